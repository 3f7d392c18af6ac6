//! Request Generator Module
//!
//! Simulated client traffic against the mock data store.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::error::{EnvError, Result};

// == Request Kind ==
/// Operation a simulated client performs on a store row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Query the row (served from cache when present)
    Read,
    /// Update the row in the store, staling any cached copy
    Write,
}

impl RequestKind {
    /// Wire code used in observations: 0 = read, 1 = write.
    pub fn code(self) -> u8 {
        match self {
            RequestKind::Read => 0,
            RequestKind::Write => 1,
        }
    }
}

impl Serialize for RequestKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// == Pending Request ==
/// One client request, drawn fresh every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub row: usize,
}

impl PendingRequest {
    pub fn read(row: usize) -> Self {
        Self {
            kind: RequestKind::Read,
            row,
        }
    }

    pub fn write(row: usize) -> Self {
        Self {
            kind: RequestKind::Write,
            row,
        }
    }

    /// Uniform draw over kind and row, used for the observation after reset.
    pub fn uniform<R: Rng + ?Sized>(store_size: usize, rng: &mut R) -> Self {
        Self {
            kind: random_kind(rng),
            row: rng.gen_range(0..store_size),
        }
    }
}

fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> RequestKind {
    if rng.gen_bool(0.5) {
        RequestKind::Write
    } else {
        RequestKind::Read
    }
}

// == Request Generator ==
/// Draws independent requests from a fixed, skewed row popularity profile.
///
/// Row weights are exponential draws normalised to sum to one, so a handful
/// of rows dominate the traffic. Kind is a fair coin independent of the row.
#[derive(Debug, Clone)]
pub struct RequestGenerator {
    popularity: Vec<f64>,
    rows: WeightedIndex<f64>,
}

impl RequestGenerator {
    // == Constructor ==
    /// Builds a generator for `store_size` rows with exponential popularity.
    pub fn new<R: Rng + ?Sized>(store_size: usize, rng: &mut R) -> Result<Self> {
        if store_size == 0 {
            return Err(EnvError::Configuration(
                "Size of simulated data store must be greater than 0".to_string(),
            ));
        }
        // Inverse CDF of Exp(1); 1 - u lies in (0, 1]
        let weights = (0..store_size)
            .map(|_| -(1.0 - rng.gen::<f64>()).ln())
            .collect();
        Self::from_weights(weights)
    }

    /// Builds a generator from explicit (unnormalised) row weights.
    pub fn from_weights(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(EnvError::Configuration(
                "Size of simulated data store must be greater than 0".to_string(),
            ));
        }
        let total: f64 = weights.iter().map(|w| w.abs()).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(EnvError::Configuration(format!(
                "row weights must have a positive finite sum, got {total}"
            )));
        }
        let popularity: Vec<f64> = weights.iter().map(|w| w.abs() / total).collect();
        let rows = WeightedIndex::new(&popularity)
            .map_err(|e| EnvError::Configuration(format!("row weights: {e}")))?;

        Ok(Self { popularity, rows })
    }

    /// Number of store rows requests are drawn from.
    pub fn store_size(&self) -> usize {
        self.popularity.len()
    }

    /// Normalised probability of each row being requested.
    pub fn popularity(&self) -> &[f64] {
        &self.popularity
    }

    // == Next Request ==
    pub fn next_request<R: Rng + ?Sized>(&self, rng: &mut R) -> PendingRequest {
        PendingRequest {
            kind: random_kind(rng),
            row: self.rows.sample(rng),
        }
    }
}
