//! Shelters from a local `shelters.json`.

use std::path::Path;

use tracing::debug;

use crate::{Config, Directory, LoadError, LoadReport, PostcodesIo, ReverseGeocoder, Shelter};

mod file;
mod normalize;

pub use file::{parse, read};
pub use normalize::normalize;

pub type Shelters = Directory<Shelter>;

pub fn load(directory: &mut Shelters, config: &Config) -> Result<Option<LoadReport>, LoadError> {
    if directory.is_loaded() {
        debug!("Shelters already loaded");
        return Ok(None);
    }

    let geocoder = PostcodesIo::new(crate::agent(config), &config.geocoder_url);
    load_from(directory, &config.shelters_path, &geocoder, config.batch_size())
}

pub fn load_from(
    directory: &mut Shelters,
    path: &Path,
    geocoder: &impl ReverseGeocoder,
    batch_size: usize,
) -> Result<Option<LoadReport>, LoadError> {
    directory.load(|| normalize(read(path)?), geocoder, batch_size)
}
