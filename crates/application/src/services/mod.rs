//! Application services - Use case implementations

pub mod alert_evaluator;
mod collector_service;
mod forecast_service;

pub use collector_service::{CollectorService, LocationOutcome, TickSummary};
pub use forecast_service::ForecastService;
