// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request fields for each API action
//!
//! The API script dispatches on the `d` field (domain) and, where a domain has
//! several operations, the `m` field (manipulation).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::http::RequestSpec;

/// App id reported at login
pub const DEFAULT_APP_ID: &str = "com.dae.TenantAppPub";

/// App version reported at login
pub const DEFAULT_APP_VERSION: &str = "1.2.6";

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LangCode {
    #[default]
    English,
    TraditionalChinese,
}

impl LangCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LangCode::English => "en",
            LangCode::TraditionalChinese => "zh-TW",
        }
    }
}

impl FromStr for LangCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" | "English" => Ok(LangCode::English),
            "zh-TW" | "zh" | "正體中文" => Ok(LangCode::TraditionalChinese),
            other => Err(Error::Config(format!("unknown language '{}'", other))),
        }
    }
}

/// Login form
#[derive(Debug, Clone)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
    pub user_code: String,
    pub app_id: String,
    pub app_version: String,
    pub lang: LangCode,
}

impl LoginParams {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        user_code: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            user_code: user_code.into(),
            app_id: DEFAULT_APP_ID.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            lang: LangCode::default(),
        }
    }

    /// Set the app id
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set the app version
    pub fn app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    /// Set the language
    pub fn lang(mut self, lang: LangCode) -> Self {
        self.lang = lang;
        self
    }
}

/// Real-time meter reading scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataQuery {
    Consumption,
    ChannelsConsumption,
    RoomConsumption,
}

impl DataQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuery::Consumption => "consumption",
            DataQuery::ChannelsConsumption => "channels-consumption",
            DataQuery::RoomConsumption => "room-consumption",
        }
    }
}

impl FromStr for DataQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "consumption" => Ok(DataQuery::Consumption),
            "channels-consumption" => Ok(DataQuery::ChannelsConsumption),
            "room-consumption" => Ok(DataQuery::RoomConsumption),
            other => Err(Error::Config(format!("unknown data query '{}'", other))),
        }
    }
}

impl fmt::Display for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meter binding operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceBinding {
    List,
    Bind { device_code: String },
    Unbind { device_code: String },
    Query { channel_name: String },
}

impl DeviceBinding {
    pub fn manipulate(&self) -> &'static str {
        match self {
            DeviceBinding::List => "list",
            DeviceBinding::Bind { .. } => "bind",
            DeviceBinding::Unbind { .. } => "unbind",
            DeviceBinding::Query { .. } => "query",
        }
    }
}

/// `d=login`
pub fn login(params: &LoginParams) -> RequestSpec {
    RequestSpec::new()
        .field("d", "login")
        .field("username", params.username.as_str())
        .field("password", params.password.as_str())
        .field("user-code", params.user_code.as_str())
        .field("app-id", params.app_id.as_str())
        .field("app-version", params.app_version.as_str())
        .field("lang-code", params.lang.as_str())
}

/// `d=logout`
pub fn logout(username: &str) -> RequestSpec {
    RequestSpec::new().field("d", "logout").field("username", username)
}

/// `d=data`
pub fn data(username: &str, query: DataQuery) -> RequestSpec {
    RequestSpec::new()
        .field("d", "data")
        .field("m", query.as_str())
        .field("username", username)
}

/// `d=device-binding`
pub fn device_binding(username: &str, op: &DeviceBinding) -> RequestSpec {
    let spec = RequestSpec::new()
        .field("d", "device-binding")
        .field("m", op.manipulate())
        .field("username", username);

    match op {
        DeviceBinding::List => spec,
        DeviceBinding::Bind { device_code } | DeviceBinding::Unbind { device_code } => {
            spec.field("device-code", device_code.as_str())
        }
        DeviceBinding::Query { channel_name } => spec.field("channel-name", channel_name.as_str()),
    }
}

/// `d=refund-report`
pub fn refund_report(username: &str) -> RequestSpec {
    RequestSpec::new().field("d", "refund-report").field("username", username)
}

/// `d=credit-report`
pub fn credit_report(username: &str) -> RequestSpec {
    RequestSpec::new().field("d", "credit-report").field("username", username)
}

/// `d=refund-issue`; `manipulate` is passed through as given
pub fn refund_issue(username: &str, manipulate: &str, device_code: &str) -> RequestSpec {
    RequestSpec::new()
        .field("d", "refund-issue")
        .field("m", manipulate)
        .field("username", username)
        .field("device-code", device_code)
}

/// `d=refund-agree`, a roommate's answer to a refund request
pub fn refund_agree(username: &str, refund_code: &str, agree: bool) -> RequestSpec {
    RequestSpec::new()
        .field("d", "refund-agree")
        .field("username", username)
        .field("refund-code", refund_code)
        .field("agree", if agree { "1" } else { "0" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_fields() {
        let params = LoginParams::new("tenant@example.com", "pw", "2119270014")
            .lang(LangCode::TraditionalChinese);
        let spec = login(&params);

        assert_eq!(spec.get("d"), Some("login"));
        assert_eq!(spec.get("app-id"), Some(DEFAULT_APP_ID));
        assert_eq!(spec.get("app-version"), Some(DEFAULT_APP_VERSION));
        assert_eq!(spec.get("lang-code"), Some("zh-TW"));
        assert_eq!(spec.len(), 7);
    }

    #[test]
    fn test_device_binding_fields() {
        let list = device_binding("u", &DeviceBinding::List);
        assert_eq!(list.encode(), "d=device-binding&m=list&username=u");

        let bind = device_binding(
            "u",
            &DeviceBinding::Bind {
                device_code: "1301907119005".to_string(),
            },
        );
        assert_eq!(bind.get("device-code"), Some("1301907119005"));
        assert_eq!(bind.get("channel-name"), None);

        let query = device_binding(
            "u",
            &DeviceBinding::Query {
                channel_name: "A140".to_string(),
            },
        );
        assert_eq!(query.get("m"), Some("query"));
        assert_eq!(query.get("channel-name"), Some("A140"));
        assert_eq!(query.get("device-code"), None);
    }

    #[test]
    fn test_data_query_parse() {
        assert_eq!(
            "channels-consumption".parse::<DataQuery>().unwrap(),
            DataQuery::ChannelsConsumption
        );
        assert!("bogus".parse::<DataQuery>().is_err());
        assert_eq!(data("u", DataQuery::RoomConsumption).get("m"), Some("room-consumption"));
    }

    #[test]
    fn test_refund_agree_flag() {
        assert_eq!(refund_agree("u", "R1", true).get("agree"), Some("1"));
        assert_eq!(refund_agree("u", "R1", false).get("agree"), Some("0"));
    }

    #[test]
    fn test_simple_reports() {
        assert_eq!(logout("u").encode(), "d=logout&username=u");
        assert_eq!(refund_report("u").get("d"), Some("refund-report"));
        assert_eq!(credit_report("u").get("d"), Some("credit-report"));
        assert_eq!(
            refund_issue("u", "issue", "1301907119005").encode(),
            "d=refund-issue&m=issue&username=u&device-code=1301907119005"
        );
    }
}
