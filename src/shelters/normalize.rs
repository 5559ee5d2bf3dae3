use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::{FatalRecord, LoadError, Normalized, Shelter, ShelterLocation};

pub fn normalize(shelters: Vec<Value>) -> Result<Normalized<Shelter>, LoadError> {
    let mut output = Normalized::default();

    for shelter in &shelters {
        output.seen += 1;

        match extract(shelter) {
            Ok(x) => output.records.push(x),
            Err(err) => {
                let fatal = FatalRecord {
                    message: format!("{err:#}"),
                    index: output.seen,
                    skipped: output.skipped,
                    json: shelter.to_string(),
                };
                error!("{fatal}");
                return Err(fatal.into());
            }
        }
    }

    Ok(output)
}

fn extract(shelter: &Value) -> Result<Shelter> {
    let raw = RawShelter::deserialize(shelter).context("invalid shelter")?;

    Ok(Shelter {
        name: raw.title,
        phone_num: raw.phone,
        location: ShelterLocation {
            thoroughfare: raw.address.thoroughfare,
            premise: raw.address.premise,
            locality: raw.address.locality,
            post_code: raw.address.postal_code,
        },
        city: String::new(),
        link: raw.permalink,
        email: raw.email,
        info: raw.info,
    })
}

#[derive(Deserialize)]
struct RawShelter {
    title: String,
    permalink: Option<String>,
    phone: Option<String>,
    email: String,
    info: String,
    address: RawAddress,
}

#[derive(Deserialize)]
struct RawAddress {
    thoroughfare: String,
    premise: String,
    locality: String,
    postal_code: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn shelter(title: &str) -> Value {
        json!({
            "title": title,
            "email": "help@example.org",
            "info": "Beds from 8pm",
            "address": {
                "thoroughfare": "Church Lane",
                "premise": "St Mary's Hall",
                "locality": "Leeds",
                "postal_code": "LS1 1AA"
            }
        })
    }

    #[test]
    fn required_and_optional_fields() {
        let mut full = shelter("Full");
        let fields = full.as_object_mut().unwrap();
        fields.insert("permalink".into(), json!("https://example.org/full"));
        fields.insert("phone".into(), json!("0113"));

        let output = normalize(vec![full, shelter("Bare")]).unwrap();
        assert_eq!(output.seen, 2);
        assert_eq!(output.skipped, 0);

        let full = &output.records[0];
        assert_eq!(full.name, "Full");
        assert_eq!(full.link.as_deref(), Some("https://example.org/full"));
        assert_eq!(full.phone_num.as_deref(), Some("0113"));
        assert_eq!(full.location.post_code, "LS1 1AA");
        assert_eq!(full.location.premise, "St Mary's Hall");

        let bare = &output.records[1];
        assert_eq!(bare.link, None);
        assert_eq!(bare.phone_num, None);
        assert_eq!(bare.email, "help@example.org");
        assert_eq!(bare.info, "Beds from 8pm");
        assert_eq!(bare.city, "");
    }

    #[test]
    fn missing_title_is_fatal() {
        let mut untitled = shelter("x");
        untitled.as_object_mut().unwrap().remove("title");

        let Err(LoadError::Record(fatal)) = normalize(vec![shelter("a"), untitled]) else {
            panic!("expected a fatal record");
        };
        assert_eq!(fatal.index, 2);
        assert_eq!(fatal.skipped, 0);
        assert!(fatal.message.contains("title"));
    }

    #[test]
    fn missing_address_field_is_fatal() {
        let mut shelter = shelter("No premise");
        shelter["address"].as_object_mut().unwrap().remove("premise");

        let Err(LoadError::Record(fatal)) = normalize(vec![shelter]) else {
            panic!("expected a fatal record");
        };
        assert_eq!(fatal.index, 1);
        assert!(fatal.json.contains("No premise"));
    }
}
