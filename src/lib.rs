//! Food bank and shelter locations, normalized and indexed by city.
//!
//! Each pipeline fetches its raw source, normalizes it into records, asks
//! postcodes.io which district every postcode belongs to and finally hands the
//! enriched records to a [`Directory`] for querying.

use ureq::{Agent, AgentBuilder};

pub mod config;
pub mod directory;
pub mod error;
pub mod food_banks;
pub mod geocode;
pub mod logging;
pub mod model;
pub mod shelters;

#[cfg(test)]
mod test_server;

pub use config::Config;
pub use directory::{Directory, LoadReport};
pub use error::{FatalRecord, GeocodeError, LoadError, QueryError};
pub use geocode::{PostcodesIo, ReverseGeocoder};
pub use model::{
    FoodBank, Geolocation, Located, Normalized, Record, ScheduleEntry, Shelter, ShelterLocation,
};

pub fn agent(config: &Config) -> Agent {
    AgentBuilder::new().user_agent(&config.user_agent).build()
}
