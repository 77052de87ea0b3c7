// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Command line definition

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use tenant_probe::api::{DataQuery, LangCode};
use tenant_probe::config::{CONFIG_PATH_ENV, HOST_ENV};

#[derive(Parser, Debug)]
#[command(name = "tenant-probe")]
#[command(about = "Tenant App API Test Harness")]
#[command(version)]
pub struct Cli {
    /// API scheme [default: http]
    #[arg(long, global = true, value_parser = ["http", "https"])]
    pub scheme: Option<String>,

    /// API host [default: clhlabs.dae.tw]
    #[arg(long, global = true, env = HOST_ENV)]
    pub host: Option<String>,

    /// API script path [default: /ws/app.php]
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Session document [default: ~/.tenant-api.json]
    #[arg(long, global = true, value_name = "FILE", env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Connect and request timeout in seconds [default: 3]
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        username: String,
        password: String,
        user_code: String,
        /// Interface language: en or zh-TW
        #[arg(long)]
        lang: Option<LangCode>,
        #[arg(long)]
        app_id: Option<String>,
        #[arg(long)]
        app_version: Option<String>,
    },

    /// Log out
    Logout { username: String },

    /// Real-time readings: consumption, channels-consumption, room-consumption
    Data { username: String, query: DataQuery },

    /// Meter binding
    DeviceBinding {
        #[command(subcommand)]
        op: BindingOp,
    },

    /// Refund history
    RefundReport { username: String },

    /// Credit history
    CreditReport { username: String },

    /// Issue a refund request
    RefundIssue {
        username: String,
        manipulate: String,
        device_code: String,
    },

    /// Answer a refund request
    RefundAgree {
        username: String,
        refund_code: String,
        /// yes or no
        #[arg(value_parser = parse_agree, action = clap::ArgAction::Set)]
        agree: bool,
    },

    /// Post arbitrary name=value fields
    Send {
        #[arg(required = true, value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Show the stored session
    Session,

    /// Drop the stored session
    Reset,

    /// Encrypt a channel payload
    Encrypt { key_seed: String, plaintext: String },

    /// Decrypt a channel payload
    Decrypt { key_seed: String, payload: String },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BindingOp {
    /// List bound meters
    List { username: String },
    /// Bind a meter
    Bind { username: String, device_code: String },
    /// Unbind a meter
    Unbind { username: String, device_code: String },
    /// Look up a channel
    Query { username: String, channel_name: String },
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", raw))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got '{}'", raw));
    }
    Ok(Duration::from_secs_f64(secs))
}

fn parse_agree(raw: &str) -> Result<bool, String> {
    match raw {
        "yes" | "1" | "true" => Ok(true),
        "no" | "0" | "false" => Ok(false),
        other => Err(format!("expected yes or no, got '{}'", other)),
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_global_options_after_command() {
        let cli = Cli::try_parse_from([
            "tenant-probe",
            "data",
            "tenant@example.com",
            "room-consumption",
            "--host",
            "clh25.dae.tw",
            "--timeout",
            "1.5",
        ])
        .unwrap();

        assert_eq!(cli.host.as_deref(), Some("clh25.dae.tw"));
        assert_eq!(cli.timeout, Some(Duration::from_millis(1500)));
        match cli.command {
            Commands::Data { username, query } => {
                assert_eq!(username, "tenant@example.com");
                assert_eq!(query, DataQuery::RoomConsumption);
            }
            other => panic!("Expected Data command, got {:?}", other),
        }
    }

    #[test]
    fn parse_login_options() {
        let cli = Cli::try_parse_from([
            "tenant-probe",
            "login",
            "tenant@example.com",
            "secret",
            "2119270014",
            "--lang",
            "zh-TW",
        ])
        .unwrap();

        match cli.command {
            Commands::Login {
                user_code,
                lang,
                app_id,
                ..
            } => {
                assert_eq!(user_code, "2119270014");
                assert_eq!(lang, Some(LangCode::TraditionalChinese));
                assert_eq!(app_id, None);
            }
            other => panic!("Expected Login command, got {:?}", other),
        }
    }

    #[test]
    fn parse_device_binding() {
        let cli =
            Cli::try_parse_from(["tenant-probe", "device-binding", "bind", "u", "1301907119005"])
                .unwrap();

        match cli.command {
            Commands::DeviceBinding { op } => assert_eq!(
                op,
                BindingOp::Bind {
                    username: "u".to_string(),
                    device_code: "1301907119005".to_string(),
                }
            ),
            other => panic!("Expected DeviceBinding command, got {:?}", other),
        }
    }

    #[test]
    fn parse_send_fields() {
        let cli = Cli::try_parse_from(["tenant-probe", "send", "d=data", "m=a=b"]).unwrap();

        match cli.command {
            Commands::Send { fields } => assert_eq!(
                fields,
                vec![
                    ("d".to_string(), "data".to_string()),
                    ("m".to_string(), "a=b".to_string()),
                ]
            ),
            other => panic!("Expected Send command, got {:?}", other),
        }

        assert!(Cli::try_parse_from(["tenant-probe", "send"]).is_err());
        assert!(Cli::try_parse_from(["tenant-probe", "send", "novalue"]).is_err());
    }

    #[test]
    fn reject_bad_values() {
        assert!(Cli::try_parse_from(["tenant-probe", "--timeout", "0", "session"]).is_err());
        assert!(Cli::try_parse_from(["tenant-probe", "--scheme", "ftp", "session"]).is_err());
        assert!(Cli::try_parse_from(["tenant-probe", "data", "u", "bogus"]).is_err());
        assert!(
            Cli::try_parse_from(["tenant-probe", "refund-agree", "u", "R1", "maybe"]).is_err()
        );
    }

    #[test]
    fn parse_refund_agree() {
        let cli = Cli::try_parse_from(["tenant-probe", "refund-agree", "u", "R1", "no"]).unwrap();
        match cli.command {
            Commands::RefundAgree { agree, .. } => assert!(!agree),
            other => panic!("Expected RefundAgree command, got {:?}", other),
        }
    }
}
