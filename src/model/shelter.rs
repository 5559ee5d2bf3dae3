use serde::{Deserialize, Serialize};

use super::{to_json_line, Record};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub name: String,
    pub phone_num: Option<String>,
    pub location: ShelterLocation,
    pub city: String,
    pub link: Option<String>,
    pub email: String,
    pub info: String,
}

// no coordinates in the source data
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterLocation {
    pub thoroughfare: String,
    pub premise: String,
    pub locality: String,
    pub post_code: String,
}

impl Shelter {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        to_json_line(self)
    }
}

impl Record for Shelter {
    fn postcode(&self) -> &str {
        &self.location.post_code
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn set_city(&mut self, city: String) {
        self.city = city;
    }
}
