//! `toolloop-kernel` runner: starts one agent against its tool server.

use anyhow::Context;
use std::process::ExitCode;
use tokio::signal;
use toolloop_kernel::infrastructure::{config::Settings, telemetry::TelemetryBuilder};
use toolloop_kernel::runner::{self, AgentKind};
use tracing::{error, info, warn};

const USAGE: &str = "usage: toolloop-kernel <mail|slides> [query...]";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(agent) = args.next() else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };
    let kind: AgentKind = match agent.parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };
    let query = args.collect::<Vec<_>>().join(" ");

    let config = Settings::new().context("Failed to load configuration")?;

    let mut telemetry_builder =
        TelemetryBuilder::new(config.telemetry.service_name.clone(), env!("CARGO_PKG_VERSION"))
            .with_log_level(config.telemetry.log_level.clone())
            .with_json(config.telemetry.json)
            .with_sampling_ratio(config.telemetry.sampling_ratio);

    if let Some(ref endpoint) = config.telemetry.otlp_endpoint {
        telemetry_builder = telemetry_builder.with_tracing(endpoint);
    }
    if let Some(ref path) = config.telemetry.audit_file {
        telemetry_builder = telemetry_builder.with_audit_file(path);
    }
    let telemetry = telemetry_builder
        .init()
        .context("Failed to initialize telemetry")?;

    info!(agent = %kind, provider = %config.inference.provider, model = %config.inference.model, "toolloop starting");

    let outcome = tokio::select! {
        result = runner::run_agent(kind, Some(query.as_str()), &config) => result,
        () = shutdown_signal() => {
            warn!("Interrupted, stopping the tool host");
            telemetry.shutdown();
            return Ok(ExitCode::from(130));
        }
    };

    let code = match outcome {
        Ok(report) => {
            println!("--- History ---");
            for line in report.history.lines(config.agent.history_result_limit) {
                println!("{line}");
            }
            println!("--- {} ---", report.terminal_state);
            if report.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Run aborted");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    Ok(code)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
