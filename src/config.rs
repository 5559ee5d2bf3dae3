use std::{fs::read_to_string, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::geocode::BATCH_LIMIT;

pub const FOOD_BANK_FEED_URL: &str =
    "https://www.trusselltrust.org/get-help/find-a-foodbank/foodbank-search/?foodbank_s=all&callback=?";
pub const GEOCODER_URL: &str = "http://api.postcodes.io/postcodes";
pub const SHELTERS_PATH: &str = "shelters.json";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub food_bank_feed_url: String,
    pub shelters_path: PathBuf,
    pub geocoder_url: String,
    pub geocode_batch_size: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            food_bank_feed_url: FOOD_BANK_FEED_URL.to_string(),
            shelters_path: PathBuf::from(SHELTERS_PATH),
            geocoder_url: GEOCODER_URL.to_string(),
            geocode_batch_size: BATCH_LIMIT,
            user_agent: concat!("aid-locations/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// postcodes.io rejects bulk lookups of more than 100 postcodes.
    pub fn batch_size(&self) -> usize {
        self.geocode_batch_size.clamp(1, BATCH_LIMIT)
    }
}
