use geo::Point;
use serde::Serialize;

mod food_bank;
mod shelter;

pub use food_bank::{FoodBank, Geolocation, ScheduleEntry};
pub use shelter::{Shelter, ShelterLocation};

/// Anything that can be geocoded by postcode and filed under a city.
pub trait Record {
    fn postcode(&self) -> &str;
    fn city(&self) -> &str;
    fn set_city(&mut self, city: String);
}

/// Records with coordinates, the only ones that can be sorted by distance.
pub trait Located {
    fn point(&self) -> Point;
}

/// Output of a normalizer: the accepted records plus how many raw records
/// were seen and skipped on the way.
pub struct Normalized<R> {
    pub records: Vec<R>,
    pub seen: usize,
    pub skipped: usize,
}

impl<R> Default for Normalized<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            seen: 0,
            skipped: 0,
        }
    }
}

/// Renders a record as single line JSON with object keys sorted.
pub fn to_json_line<T: Serialize>(record: &T) -> serde_json::Result<String> {
    // Value maps are BTreeMaps, so going through Value sorts every level
    Ok(serde_json::to_value(record)?.to_string())
}
