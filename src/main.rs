use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use synprobe::cli::{Cli, Command};
use synprobe::config::{ConfigError, ControllerConfig, EventsConfig};
use synprobe::controller::{self, ControllerError};
use synprobe::events::{AnalyticsRecord, EventsClient, EventsError};
use synprobe::measurement::{MeasurementSource, StaticSource};
use synprobe::probe::{self, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Events(#[from] EventsError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "synprobe=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::RunTest {
            schema_name,
            url,
            mesid,
            timeout_secs,
        } => {
            let config = EventsConfig::from_env(&schema_name)?;
            let client = probe::build_client(Duration::from_secs(timeout_secs))?;

            let target = url.unwrap_or_else(|| probe::pick_candidate().to_string());
            let result = probe::probe_url(&client, &target).await;
            info!(
                url = %result.url,
                status = result.status_code(),
                elapsed_ms = result.response_time_ms(),
                transport_error = result.is_transport_error(),
                "probe finished"
            );

            let source = StaticSource::new(mesid);
            let record = AnalyticsRecord::from_probe(&result, &source.measurement_id());
            EventsClient::new(client, config).publish(&[record]).await?;
        }

        Command::CreateSchema { schema_name } => {
            events_client(&schema_name)?.create_schema().await?;
        }

        Command::DeleteSchema { schema_name } => {
            events_client(&schema_name)?.delete_schema().await?;
        }

        Command::Query { schema_name } => {
            let body = events_client(&schema_name)?.query().await?;
            println!("{body}");
        }

        Command::ControllerMetric => {
            let config = ControllerConfig::from_env()?;
            let client = probe::build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
            let body = controller::query_metric(&client, &config).await?;
            println!("{body}");
        }
    }
    Ok(())
}

fn events_client(schema_name: &str) -> Result<EventsClient, AppError> {
    let config = EventsConfig::from_env(schema_name)?;
    let client = probe::build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
    Ok(EventsClient::new(client, config))
}
