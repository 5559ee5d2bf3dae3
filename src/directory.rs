use geo::{EuclideanDistance, Point};
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    geocode::{self, CityIndex, ReverseGeocoder},
    LoadError, Located, Normalized, QueryError, Record,
};

/// Records of one kind, loaded once and then only read.
pub struct Directory<R> {
    state: State<R>,
}

enum State<R> {
    Uninitialized,
    Loaded(Store<R>),
}

struct Store<R> {
    records: Vec<R>,
    cities: CityIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub seen: usize,
    pub skipped: usize,
    pub loaded: usize,
    pub geocoded: usize,
}

impl<R> Default for Directory<R> {
    fn default() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }
}

impl<R: Record> Directory<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Normalizes with `source`, geocodes the result and stores it. Does
    /// nothing if the directory is already loaded. On error the directory is
    /// left untouched.
    pub fn load(
        &mut self,
        source: impl FnOnce() -> Result<Normalized<R>, LoadError>,
        geocoder: &impl ReverseGeocoder,
        batch_size: usize,
    ) -> Result<Option<LoadReport>, LoadError> {
        if self.is_loaded() {
            debug!("Directory already loaded, skipping");
            return Ok(None);
        }

        let Normalized {
            mut records,
            seen,
            skipped,
        } = source()?;
        let cities = geocode::enrich(&mut records, geocoder, batch_size)?;

        let report = LoadReport {
            seen,
            skipped,
            loaded: records.len(),
            geocoded: cities.values().map(Vec::len).sum(),
        };
        info!(
            "Loaded {} of {} records ({} skipped), {} geocoded into {} cities",
            report.loaded,
            report.seen,
            report.skipped,
            report.geocoded,
            cities.len()
        );

        self.state = State::Loaded(Store { records, cities });
        Ok(Some(report))
    }

    fn store(&self) -> Result<&Store<R>, QueryError> {
        match &self.state {
            State::Loaded(x) => Ok(x),
            State::Uninitialized => Err(QueryError::NotLoaded),
        }
    }

    pub fn all(&self) -> Result<&[R], QueryError> {
        Ok(&self.store()?.records)
    }

    /// Cities with at least one geocoded record, in no particular order.
    pub fn cities(&self) -> Result<Vec<&str>, QueryError> {
        Ok(self.store()?.cities.keys().map(String::as_str).collect())
    }

    pub fn by_city(&self, city: &str) -> Result<Vec<&R>, QueryError> {
        let store = self.store()?;
        let bucket = store
            .cities
            .get(city)
            .ok_or_else(|| QueryError::UnknownCity(city.to_string()))?;
        Ok(bucket.iter().map(|&i| &store.records[i]).collect())
    }
}

impl<R: Record + Located> Directory<R> {
    /// Sorts `records` by distance from (`lat`, `lng`), nearest first. Ties
    /// keep their input order.
    pub fn sorted_by_location<'a>(
        &self,
        lat: f64,
        lng: f64,
        records: impl IntoIterator<Item = &'a R>,
    ) -> Result<Vec<&'a R>, QueryError>
    where
        R: 'a,
    {
        self.store()?;
        Ok(records
            .into_iter()
            .map(|x| (distance(lat, lng, x), x))
            .sorted_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, x)| x)
            .collect())
    }

    pub fn nearest(&self, lat: f64, lng: f64, n: usize) -> Result<Vec<&R>, QueryError> {
        let mut sorted = self.sorted_by_location(lat, lng, self.all()?)?;
        sorted.truncate(n);
        Ok(sorted)
    }
}

/// Planar distance in degrees, not metres.
pub fn distance(lat: f64, lng: f64, record: &impl Located) -> f64 {
    Point::new(lng, lat).euclidean_distance(&record.point())
}
