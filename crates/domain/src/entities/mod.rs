//! Entities - Domain objects with identity and lifecycle

mod alert_event;
mod alert_rule;
mod forecast;
mod location;
mod observation;

pub use alert_event::AlertEvent;
pub use alert_rule::{AlertRule, LocationScope, Metric, Operator};
pub use forecast::{ConfidenceInterval, ForecastResult, InvalidInterval};
pub use location::Location;
pub use observation::{Observation, ObservationKey};
