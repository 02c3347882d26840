//! Skywatch CLI
//!
//! Runs the collection pipeline and provides one-shot administration
//! commands against the observation store.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use application::ports::{ObservationStorePort, TimeRange};
use application::services::CollectorService;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use domain::value_objects::{LocationId, ObservationTimestamp};
use infrastructure::{
    AppConfig, RetryingProvider, SqliteObservationStore, TaskScheduler, TracingAlertSink,
    collection_task, create_pool, init_tracing,
};
use integration_openweather::{OpenWeatherClient, OpenWeatherConfig};
use tracing::info;

type Pipeline =
    CollectorService<RetryingProvider<OpenWeatherClient>, SqliteObservationStore, TracingAlertSink>;

/// Skywatch weather data pipeline
#[derive(Parser)]
#[command(name = "skywatch")]
#[command(author, version, about = "Skywatch weather data pipeline", long_about = None)]
struct Cli {
    /// Configuration file name, without extension (TOML/JSON/YAML)
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scheduled collection until interrupted
    Run,

    /// Run a single collection tick and exit
    Collect,

    /// Query stored observations for a location within a time range
    Query {
        /// Location identifier
        location: String,

        /// Range start, RFC 3339 (e.g. 2026-08-28T00:00:00Z), inclusive
        #[arg(long)]
        from: String,

        /// Range end, RFC 3339, inclusive
        #[arg(long)]
        to: String,
    },

    /// Show the most recent observation for a location
    Latest {
        /// Location identifier
        location: String,
    },

    /// Validate the configuration and print a summary
    CheckConfig,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse an RFC 3339 timestamp into the store's minute-keyed form
fn parse_timestamp(s: &str) -> anyhow::Result<ObservationTimestamp> {
    let at = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid RFC 3339 timestamp: {s}"))?;
    Ok(ObservationTimestamp::new(at.with_timezone(&Utc)))
}

fn build_store(config: &AppConfig) -> anyhow::Result<Arc<SqliteObservationStore>> {
    let pool = create_pool(&config.database).context("failed to open observation store")?;
    Ok(Arc::new(SqliteObservationStore::new(Arc::new(pool))))
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<Arc<Pipeline>> {
    let store = build_store(config)?;

    let api_key = config
        .provider
        .api_key
        .clone()
        .context("provider.api_key is not configured (set SKYWATCH_PROVIDER__API_KEY)")?;
    let client = OpenWeatherClient::new(OpenWeatherConfig {
        base_url: config.provider.base_url.clone(),
        api_key,
        timeout_secs: config.provider.timeout_secs,
    })?;
    let provider = RetryingProvider::new(client, config.provider.retry.to_retry_config());

    let locations = config.locations().context("invalid location entry")?;
    let rules = config.alert_rules().context("invalid alert rule")?;

    Ok(Arc::new(CollectorService::new(
        Arc::new(provider),
        store,
        Arc::new(TracingAlertSink::new()),
        rules,
        locations,
        config.collector.append_mode,
        config.collector.max_concurrent_fetches,
    )))
}

async fn run_scheduled(config: &AppConfig) -> anyhow::Result<()> {
    let collector = build_pipeline(config)?;

    let scheduler = TaskScheduler::new().await?;
    scheduler
        .add_task("collection", &config.collector.schedule, collection_task(collector))
        .await?;
    scheduler.start().await?;

    info!(schedule = %config.collector.schedule, "Collection scheduled");
    println!("Skywatch running (schedule: {})", config.collector.schedule);
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    println!("Shutting down...");
    scheduler.stop().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config).context("failed to load configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_tracing(&config.telemetry)?;

    match cli.command {
        Commands::Run => run_scheduled(&config).await?,

        Commands::Collect => {
            let collector = build_pipeline(&config)?;
            let summary = collector.tick().await;

            println!("Collection tick complete:");
            println!("  appended:   {}", summary.appended);
            println!("  duplicates: {}", summary.duplicates);
            println!("  invalid:    {}", summary.invalid);
            println!("  failed:     {}", summary.failed);
            println!("  alerts:     {}", summary.alerts);

            if summary.failed > 0 {
                std::process::exit(1);
            }
        },

        Commands::Query { location, from, to } => {
            let store = build_store(&config)?;
            let location = LocationId::new(location)?;
            let range = TimeRange::new(parse_timestamp(&from)?, parse_timestamp(&to)?)?;

            let observations = store.query(&location, range).await?;
            for obs in &observations {
                println!(
                    "{}  {}  {}  {}  {}",
                    obs.observed_at, obs.temperature, obs.humidity, obs.wind_speed, obs.condition
                );
            }
            println!("{} observation(s)", observations.len());
        },

        Commands::Latest { location } => {
            let store = build_store(&config)?;
            let location = LocationId::new(location)?;

            match store.latest(&location).await? {
                Some(obs) => {
                    println!("Latest for {location}:");
                    println!("  observed at: {}", obs.observed_at);
                    println!("  temperature: {}", obs.temperature);
                    println!("  humidity:    {}", obs.humidity);
                    println!("  wind speed:  {}", obs.wind_speed);
                    println!("  condition:   {}", obs.condition);
                },
                None => println!("No observations stored for {location}"),
            }
        },

        Commands::CheckConfig => {
            config
                .collector
                .schedule
                .parse::<cron::Schedule>()
                .with_context(|| format!("invalid cron schedule: {}", config.collector.schedule))?;
            let locations = config.locations().context("invalid location entry")?;
            let rules = config.alert_rules().context("invalid alert rule")?;

            println!("Configuration OK");
            println!("  database:  {}", config.database.path);
            println!("  provider:  {}", config.provider.base_url);
            println!(
                "  api key:   {}",
                if config.provider.api_key.is_some() {
                    "set"
                } else {
                    "MISSING"
                }
            );
            println!("  schedule:  {}", config.collector.schedule);
            println!("  mode:      {:?}", config.collector.append_mode);
            println!("  locations: {}", locations.len());
            for location in &locations {
                println!("    - {location}");
            }
            println!("  alerts:    {}", rules.len());
            for rule in &rules {
                println!("    - {rule}");
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339() {
        let ts = parse_timestamp("2026-08-28T09:26:53Z").unwrap();
        assert_eq!(ts.to_string(), "2026-08-28 09:26 UTC");
    }

    #[test]
    fn parse_timestamp_accepts_offsets() {
        let ts = parse_timestamp("2026-08-28T11:26:00+02:00").unwrap();
        assert_eq!(ts.to_string(), "2026-08-28 09:26 UTC");
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2026-08-28").is_err());
    }
}
