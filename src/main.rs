// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! tenant-probe CLI - Tenant App API Test Harness
//!
//! One command per API action. The session cookie is kept in the session
//! document so a `login` carries over to later invocations.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use tenant_probe::api::{actions, DeviceBinding, LoginParams};
use tenant_probe::{crypto, ApiEnvelope, LoginSummary, ProbeConfig, RequestDispatcher, RequestSpec};

use cli::{BindingOp, Cli, Commands};

/// Exit status when the server could not be reached
const EXIT_NO_RESPONSE: u8 = 2;

/// Exit status when the API answered `"result": false`
const EXIT_REJECTED: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for responses
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tenant_probe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // commands that never touch the network or the session document
    match &cli.command {
        Commands::Version => {
            println!("tenant-probe {}", tenant_probe::VERSION);
            return ExitCode::SUCCESS;
        }
        Commands::Encrypt {
            key_seed,
            plaintext,
        } => return encrypt(key_seed, plaintext),
        Commands::Decrypt { key_seed, payload } => return decrypt(key_seed, payload),
        _ => {}
    }

    let config = match probe_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    match cli.command {
        Commands::Session => show_session(&config),
        Commands::Reset => reset_session(&config),
        Commands::Login {
            username,
            password,
            user_code,
            lang,
            app_id,
            app_version,
        } => {
            let mut params = LoginParams::new(username, password, user_code);
            if let Some(lang) = lang {
                params = params.lang(lang);
            }
            if let Some(app_id) = app_id {
                params = params.app_id(app_id);
            }
            if let Some(app_version) = app_version {
                params = params.app_version(app_version);
            }
            login(&config, params).await
        }
        Commands::Logout { username } => call(&config, "logout", actions::logout(&username)).await,
        Commands::Data { username, query } => {
            call(&config, "data", actions::data(&username, query)).await
        }
        Commands::DeviceBinding { op } => {
            let (username, op) = device_binding(op);
            call(
                &config,
                "device-binding",
                actions::device_binding(&username, &op),
            )
            .await
        }
        Commands::RefundReport { username } => {
            call(&config, "refund-report", actions::refund_report(&username)).await
        }
        Commands::CreditReport { username } => {
            call(&config, "credit-report", actions::credit_report(&username)).await
        }
        Commands::RefundIssue {
            username,
            manipulate,
            device_code,
        } => {
            call(
                &config,
                "refund-issue",
                actions::refund_issue(&username, &manipulate, &device_code),
            )
            .await
        }
        Commands::RefundAgree {
            username,
            refund_code,
            agree,
        } => {
            call(
                &config,
                "refund-agree",
                actions::refund_agree(&username, &refund_code, agree),
            )
            .await
        }
        Commands::Send { fields } => call(&config, "send", fields.into_iter().collect()).await,
        // handled above
        Commands::Version | Commands::Encrypt { .. } | Commands::Decrypt { .. } => {
            ExitCode::SUCCESS
        }
    }
}

/// Global options over the built-in defaults
fn probe_config(cli: &Cli) -> tenant_probe::Result<ProbeConfig> {
    let mut config = match &cli.config {
        Some(path) => ProbeConfig::new(path),
        None => ProbeConfig::with_default_path()?,
    };

    if let Some(scheme) = &cli.scheme {
        config = config.scheme(scheme);
    }
    if let Some(host) = cli.host.as_deref().filter(|h| !h.is_empty()) {
        config = config.host(host);
    }
    if let Some(path) = &cli.path {
        config = config.path(path);
    }
    if let Some(timeout) = cli.timeout {
        config = config.timeout(timeout);
    }

    // fail before any request on a bad host or path
    config.endpoint.url()?;
    if !config.endpoint.is_known_host() {
        tracing::warn!(host = %config.endpoint.host, "Host is not a known tenant API server");
    }

    Ok(config)
}

fn device_binding(op: BindingOp) -> (String, DeviceBinding) {
    match op {
        BindingOp::List { username } => (username, DeviceBinding::List),
        BindingOp::Bind {
            username,
            device_code,
        } => (username, DeviceBinding::Bind { device_code }),
        BindingOp::Unbind {
            username,
            device_code,
        } => (username, DeviceBinding::Unbind { device_code }),
        BindingOp::Query {
            username,
            channel_name,
        } => (username, DeviceBinding::Query { channel_name }),
    }
}

fn build_dispatcher(config: &ProbeConfig) -> Option<RequestDispatcher> {
    let store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "Failed to load session from {}: {}",
                config.config_path.display(),
                e
            );
            return None;
        }
    };

    match config.dispatcher(store) {
        Ok(dispatcher) => Some(dispatcher),
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            None
        }
    }
}

/// Send one action and print what came back
async fn call(config: &ProbeConfig, action: &str, fields: RequestSpec) -> ExitCode {
    let Some(dispatcher) = build_dispatcher(config) else {
        return ExitCode::from(1);
    };

    match exchange(&dispatcher, config, action, &fields).await {
        Ok(envelope) => exit_for(envelope.as_ref()),
        Err(code) => code,
    }
}

async fn exchange(
    dispatcher: &RequestDispatcher,
    config: &ProbeConfig,
    action: &str,
    fields: &RequestSpec,
) -> Result<Option<ApiEnvelope>, ExitCode> {
    println!("{} -> {}", action, config.endpoint);

    let response = match dispatcher.send(&config.endpoint, fields).await {
        Ok(response) => response,
        Err(e) if e.is_transport() => {
            eprintln!("{}: no response ({})", action, e);
            return Err(ExitCode::from(EXIT_NO_RESPONSE));
        }
        Err(e) => {
            eprintln!("{}: request failed: {}", action, e);
            return Err(ExitCode::from(1));
        }
    };

    println!(
        "Status: {} ({} ms, {} bytes)",
        response.status,
        response.response_time_ms,
        response.body_len()
    );

    let envelope = match ApiEnvelope::parse(&response.text_lossy()) {
        Ok(envelope) => {
            println!("Result: {}", if envelope.is_ok() { "ok" } else { "failed" });
            println!(
                "{}",
                serde_json::to_string_pretty(envelope.body())
                    .unwrap_or_else(|_| envelope.body().to_string())
            );
            Some(envelope)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Response body is not a JSON envelope");
            println!("{}", response.text_lossy());
            None
        }
    };

    let session = dispatcher.store().session();
    if session.is_active() {
        println!("Session: {}", session.session_id);
    }

    Ok(envelope)
}

fn exit_for(envelope: Option<&ApiEnvelope>) -> ExitCode {
    match envelope {
        Some(envelope) if !envelope.is_ok() => ExitCode::from(EXIT_REJECTED),
        _ => ExitCode::SUCCESS,
    }
}

async fn login(config: &ProbeConfig, params: LoginParams) -> ExitCode {
    let Some(dispatcher) = build_dispatcher(config) else {
        return ExitCode::from(1);
    };

    let existing = dispatcher.store().session();
    if existing.is_active() && !existing.is_expired(chrono::Utc::now().timestamp_millis()) {
        tracing::info!(session_id = %existing.session_id, "Stored session has not expired, logging in again");
    }

    let envelope = match exchange(&dispatcher, config, "login", &actions::login(&params)).await {
        Ok(envelope) => envelope,
        Err(code) => return code,
    };

    if let Some(summary) = envelope.as_ref().and_then(LoginSummary::from_envelope) {
        println!("Topic prefix: {}", summary.topic_prefix());
        println!("Key seed: {}", summary.key_seed());
    }

    exit_for(envelope.as_ref())
}

fn show_session(config: &ProbeConfig) -> ExitCode {
    let store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "Failed to load session from {}: {}",
                config.config_path.display(),
                e
            );
            return ExitCode::from(1);
        }
    };

    let session = store.session();
    println!("Document: {}", store.location().display());

    if !session.is_active() {
        println!("No session");
        return ExitCode::SUCCESS;
    }

    println!("Session: {}", session.session_id);
    match session.updated_at {
        Some(updated_at) => println!("Updated: {}", updated_at.to_rfc3339()),
        None => println!("Updated: never"),
    }
    match session.expires_at_time() {
        Some(expires) => {
            let state = if session.is_expired(chrono::Utc::now().timestamp_millis()) {
                "expired"
            } else {
                "valid"
            };
            println!("Expires: {} ({})", expires.to_rfc3339(), state);
        }
        None => println!("Expires: unknown"),
    }

    ExitCode::SUCCESS
}

fn reset_session(config: &ProbeConfig) -> ExitCode {
    match config.reset_store() {
        Ok(_) => {
            println!("Session cleared in {}", config.config_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to reset session: {}", e);
            ExitCode::from(1)
        }
    }
}

fn encrypt(key_seed: &str, plaintext: &str) -> ExitCode {
    match crypto::encrypt(plaintext, key_seed) {
        Ok(payload) => {
            println!("{}", payload);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Encryption failed: {}", e);
            ExitCode::from(1)
        }
    }
}

fn decrypt(key_seed: &str, payload: &str) -> ExitCode {
    match crypto::decrypt(payload, key_seed) {
        Ok(plaintext) => {
            println!("{}", plaintext);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Decryption failed: {}", e);
            ExitCode::from(1)
        }
    }
}
