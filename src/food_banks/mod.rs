//! Trussell Trust food banks.

use tracing::debug;

use crate::{Config, Directory, FoodBank, LoadError, LoadReport, PostcodesIo, ReverseGeocoder};

mod feed;
mod normalize;

pub use feed::{fetch, parse, strip_jsonp, RawGroup};
pub use normalize::normalize;

pub type FoodBanks = Directory<FoodBank>;

/// Fetches the feed and geocodes it into `directory`, unless it is already
/// loaded.
pub fn load(directory: &mut FoodBanks, config: &Config) -> Result<Option<LoadReport>, LoadError> {
    if directory.is_loaded() {
        debug!("Food banks already loaded");
        return Ok(None);
    }

    let agent = crate::agent(config);
    let body = fetch(&agent, &config.food_bank_feed_url)?;
    let geocoder = PostcodesIo::new(agent, &config.geocoder_url);
    load_from(directory, &body, &geocoder, config.batch_size())
}

/// Like [`load`] but with an already fetched feed body.
pub fn load_from(
    directory: &mut FoodBanks,
    body: &str,
    geocoder: &impl ReverseGeocoder,
    batch_size: usize,
) -> Result<Option<LoadReport>, LoadError> {
    directory.load(|| normalize(parse(body)?), geocoder, batch_size)
}
