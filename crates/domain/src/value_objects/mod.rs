//! Value Objects - Immutable, identity-less domain primitives

mod condition;
mod geo_location;
mod humidity;
mod location_id;
mod observation_timestamp;
mod temperature;
mod wind_speed;

pub use condition::Condition;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use humidity::{Humidity, InvalidHumidity};
pub use location_id::{InvalidLocationId, LocationId};
pub use observation_timestamp::ObservationTimestamp;
pub use temperature::{InvalidTemperature, Temperature};
pub use wind_speed::{InvalidWindSpeed, WindSpeed};
