use std::fmt;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::{debug, error};

use super::RawGroup;
use crate::{FatalRecord, FoodBank, Geolocation, LoadError, Normalized, ScheduleEntry};

enum Extracted<T> {
    Record(T),
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SkipReason {
    MissingField(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(x) => write!(f, "missing {x}"),
        }
    }
}

pub fn normalize(groups: Vec<RawGroup>) -> Result<Normalized<FoodBank>, LoadError> {
    let mut output = Normalized::default();

    for group in &groups {
        let centres = match &group.foodbank_centre {
            Value::Bool(false) => continue,
            Value::Array(x) => x,
            x => {
                return Err(LoadError::Feed(format!(
                    "unexpected foodbank_centre: {x}"
                )))
            }
        };

        for centre in centres {
            output.seen += 1;

            match extract(&group.foodbank_information, centre) {
                Ok(Extracted::Record(x)) => output.records.push(x),
                Ok(Extracted::Skipped(reason)) => {
                    output.skipped += 1;
                    debug!("Skipping food bank #{}: {reason}", output.seen);
                }
                Err(err) => {
                    let fatal = FatalRecord {
                        message: format!("{err:#}"),
                        index: output.seen,
                        skipped: output.skipped,
                        json: centre.to_string(),
                    };
                    error!("{fatal}");
                    return Err(fatal.into());
                }
            }
        }
    }

    Ok(output)
}

fn extract(information: &Value, centre: &Value) -> Result<Extracted<FoodBank>> {
    let Some(fields) = centre.as_object() else {
        bail!("centre is not an object");
    };
    for key in ["post_code", "foodbank_name"] {
        if !fields.contains_key(key) {
            return Ok(Extracted::Skipped(SkipReason::MissingField(key)));
        }
    }

    let centre = RawCentre::deserialize(centre).context("invalid foodbank_centre")?;
    let location = centre.centre_geolocation;

    // a centre's own phone key wins even when null
    let phone_num = match centre.foodbank_telephone_number {
        Some(x) => x,
        None => group_field(information, "telephone_number")?,
    };

    Ok(Extracted::Record(FoodBank {
        name: centre.foodbank_name,
        phone_num,
        schedules: centre
            .opening_time
            .into_iter()
            .map(|x| ScheduleEntry {
                day: x.day,
                is_open: x.foodbank_status == "open",
                opening_time: x.opening_time,
                closing_time: x.closing_time,
            })
            .collect(),
        address: centre
            .centre_address
            .unwrap_or_else(|| location.address.clone()),
        post_code: centre.post_code,
        location: Geolocation {
            address: location.address,
            lat: location.lat,
            lng: location.lng,
        },
        city: String::new(),
        link: group_field(information, "permalink")?,
    }))
}

/// Group fields are only read when a centre needs them.
fn group_field(information: &Value, key: &str) -> Result<Option<String>> {
    match information.get(key) {
        Some(x) => Option::<String>::deserialize(x)
            .with_context(|| format!("invalid foodbank_information.{key}")),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
struct RawCentre {
    foodbank_name: String,
    post_code: String,
    /// Outer `None` when the key is absent, inner `None` when it is null.
    #[serde(default, with = "::serde_with::rust::double_option")]
    foodbank_telephone_number: Option<Option<String>>,
    centre_address: Option<String>,
    centre_geolocation: RawGeolocation,
    #[serde(default)]
    opening_time: Vec<RawOpeningTime>,
}

// coordinates come as numbers or as numeric strings
#[serde_as]
#[derive(Deserialize)]
struct RawGeolocation {
    address: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    lat: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    lng: f64,
}

#[derive(Deserialize)]
struct RawOpeningTime {
    day: String,
    foodbank_status: String,
    opening_time: String,
    closing_time: String,
}
