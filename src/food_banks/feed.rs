use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use ureq::Agent;

use crate::LoadError;

/// One charity in the feed, sharing its phone number and link with its
/// centres. Both halves stay raw so that bad data can be reported per centre.
#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub foodbank_information: Value,
    /// Either `false` or a list of centres.
    pub foodbank_centre: Value,
}

pub fn fetch(agent: &Agent, url: &str) -> Result<String, LoadError> {
    info!("Fetching food banks from {url}");
    let response = agent.get(url).call().map_err(|source| LoadError::Fetch {
        url: url.to_string(),
        source: Box::new(source),
    })?;

    // into_string() caps bodies at 10MB
    let mut body = String::new();
    response.into_reader().read_to_string(&mut body)?;
    Ok(body)
}

/// The feed is wrapped as `?(...);`
pub fn strip_jsonp(body: &str) -> Result<&str, LoadError> {
    body.len()
        .checked_sub(2)
        .and_then(|end| body.get(2..end))
        .ok_or_else(|| LoadError::Feed(format!("not a JSONP body: {body:?}")))
}

pub fn parse(body: &str) -> Result<Vec<RawGroup>, LoadError> {
    Ok(serde_json::from_str(strip_jsonp(body)?)?)
}
