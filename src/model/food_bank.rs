use geo::Point;
use serde::{Deserialize, Serialize};

use super::{to_json_line, Located, Record};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodBank {
    pub name: String,
    pub phone_num: Option<String>,
    pub schedules: Vec<ScheduleEntry>,
    pub address: String,
    pub post_code: String,
    pub location: Geolocation,
    pub city: String,
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day: String,
    pub is_open: bool,
    pub opening_time: String,
    pub closing_time: String,
}

impl FoodBank {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        to_json_line(self)
    }
}

impl Record for FoodBank {
    fn postcode(&self) -> &str {
        &self.post_code
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn set_city(&mut self, city: String) {
        self.city = city;
    }
}

impl Located for FoodBank {
    fn point(&self) -> Point {
        Point::new(self.location.lng, self.location.lat)
    }
}
