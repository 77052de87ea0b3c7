// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tenant app API actions
//!
//! Field builders for each call and the generic response envelope. Payload
//! contents beyond the `result` flag are left to the caller.

pub mod actions;
mod envelope;

pub use actions::{DataQuery, DeviceBinding, LangCode, LoginParams};
pub use envelope::{ApiEnvelope, LoginSummary};
