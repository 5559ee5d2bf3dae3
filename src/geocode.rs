use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ureq::Agent;

use crate::{GeocodeError, Record};

/// Largest bulk lookup postcodes.io accepts.
pub const BATCH_LIMIT: usize = 100;

/// Record indices per city, in record order.
pub type CityIndex = BTreeMap<String, Vec<usize>>;

pub trait ReverseGeocoder {
    /// Looks up the admin district of every postcode. The result is
    /// positionally aligned with `postcodes`; `None` means no match.
    fn districts(&self, postcodes: &[&str]) -> Result<Vec<Option<String>>, GeocodeError>;
}

pub struct PostcodesIo {
    agent: Agent,
    url: String,
}

impl PostcodesIo {
    pub fn new(agent: Agent, url: impl Into<String>) -> Self {
        Self {
            agent,
            url: url.into(),
        }
    }
}

impl ReverseGeocoder for PostcodesIo {
    fn districts(&self, postcodes: &[&str]) -> Result<Vec<Option<String>>, GeocodeError> {
        // ureq turns 4xx/5xx into errors
        let response: BulkResponse = self
            .agent
            .post(&self.url)
            .send_json(BulkRequest { postcodes })
            .map_err(Box::new)?
            .into_json()?;

        Ok(response.districts())
    }
}

#[derive(Serialize)]
struct BulkRequest<'a> {
    postcodes: &'a [&'a str],
}

#[derive(Deserialize)]
struct BulkResponse {
    result: Vec<BulkResult>,
}

impl BulkResponse {
    fn districts(self) -> Vec<Option<String>> {
        self.result
            .into_iter()
            .map(|x| x.result.and_then(|x| x.admin_district))
            .collect()
    }
}

#[derive(Deserialize)]
struct BulkResult {
    result: Option<PostcodeInfo>,
}

#[derive(Deserialize)]
struct PostcodeInfo {
    admin_district: Option<String>,
}

/// Assigns a city to every record the geocoder can place and returns the
/// city index. Records without a match keep an empty city.
pub fn enrich<R: Record>(
    records: &mut [R],
    geocoder: &impl ReverseGeocoder,
    batch_size: usize,
) -> Result<CityIndex, GeocodeError> {
    let batch_size = batch_size.clamp(1, BATCH_LIMIT);
    let mut index = CityIndex::new();
    let mut unmatched = Vec::new();

    for (n, chunk) in records.chunks_mut(batch_size).enumerate() {
        let offset = n * batch_size;
        let postcodes: Vec<&str> = chunk.iter().map(|x| x.postcode()).collect();
        debug!(
            "Looking up {} postcodes ({}..{})",
            postcodes.len(),
            offset,
            offset + postcodes.len()
        );

        let districts = geocoder.districts(&postcodes)?;
        if districts.len() != chunk.len() {
            return Err(GeocodeError::Misaligned {
                expected: chunk.len(),
                got: districts.len(),
            });
        }

        for (i, (record, district)) in chunk.iter_mut().zip(districts).enumerate() {
            match district {
                Some(city) => {
                    index.entry(city.clone()).or_default().push(offset + i);
                    record.set_city(city);
                }
                None => unmatched.push(offset + i),
            }
        }
    }

    if !unmatched.is_empty() {
        warn!(
            "{} postcodes had no district: {}",
            unmatched.len(),
            unmatched.iter().map(|&i| records[i].postcode()).join(", ")
        );
    }

    Ok(index)
}
