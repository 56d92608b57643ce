// src/main.rs
use healthcheck::config::{self, ReportFormat};
use healthcheck::report::{Verdict, CONFIG_ERROR_EXIT};
use healthcheck::runner::CheckRunner;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; values already in the environment win.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthcheck=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "healthcheck.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = match config::load_config(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            std::process::exit(CONFIG_ERROR_EXIT);
        }
    };

    info!("Running {} checks", config.targets.len());
    let runner = CheckRunner::new(config.default_timeout());
    let outcomes = runner.run(&config.targets).await;
    let verdict = Verdict::from_outcomes(outcomes);

    match config.report {
        ReportFormat::Text => println!("{}", verdict.render()),
        ReportFormat::Json => match serde_json::to_string_pretty(&verdict) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to encode JSON report: {}", e);
                println!("{}", verdict.render());
            }
        },
    }

    std::process::exit(verdict.exit_code());
}
