use std::{fs::read_to_string, path::Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::LoadError;

#[derive(Deserialize)]
struct ShelterFile {
    #[serde(rename = "Shelters")]
    shelters: Vec<Value>,
}

pub fn read(path: &Path) -> Result<Vec<Value>, LoadError> {
    info!("Reading shelters from {}", path.display());
    parse(&read_to_string(path)?)
}

pub fn parse(text: &str) -> Result<Vec<Value>, LoadError> {
    let file: ShelterFile = serde_json::from_str(text)?;
    Ok(file.shelters)
}
