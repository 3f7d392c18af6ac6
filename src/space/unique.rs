//! Unique Multi-Discrete Space
//!
//! Draws one integer per position from that position's range and rejects
//! any draw where two positions share a value.

use std::collections::HashSet;
use std::ops::Range;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{EnvError, Result};

// == Unique Multi Discrete ==
/// A vector of `k` discrete values whose components are pairwise distinct.
///
/// Position `i` takes values in `start[i]..start[i] + size[i]`. Sampling is
/// unbounded rejection sampling: the caller must make sure a duplicate-free
/// vector exists (e.g. `k <= size` when every position shares one range),
/// otherwise `sample` never returns. `with_max_attempts` turns that into a
/// `SamplingExhausted` error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueMultiDiscrete {
    sizes: Vec<usize>,
    starts: Vec<usize>,
    max_attempts: Option<usize>,
}

impl UniqueMultiDiscrete {
    // == Constructor ==
    /// Creates a space where position `i` ranges over `0..sizes[i]`.
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        let starts = vec![0; sizes.len()];
        Self::with_start(sizes, starts)
    }

    /// Creates a space where position `i` ranges over `starts[i]..starts[i] + sizes[i]`.
    pub fn with_start(sizes: Vec<usize>, starts: Vec<usize>) -> Result<Self> {
        if sizes.len() != starts.len() {
            return Err(EnvError::Configuration(format!(
                "{} sizes but {} start offsets",
                sizes.len(),
                starts.len()
            )));
        }
        if let Some(position) = sizes.iter().position(|&n| n == 0) {
            return Err(EnvError::Configuration(format!(
                "position {position} has an empty range"
            )));
        }
        Ok(Self {
            sizes,
            starts,
            max_attempts: None,
        })
    }

    /// Caps the number of rejected draws before `sample` gives up.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Number of positions in a sample.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Value range for one position.
    pub fn range(&self, position: usize) -> Range<usize> {
        let start = self.starts[position];
        start..start + self.sizes[position]
    }

    // == Sample ==
    /// Draws a duplicate-free vector, each position uniform over its range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<usize>> {
        self.sample_until_unique(rng, |rng, position| {
            rng.gen_range(self.range(position))
        })
    }

    /// Draws a duplicate-free vector, position `i` weighted by `probability[i]`.
    ///
    /// `probability[i][j]` is the relative weight of `start[i] + j`.
    pub fn sample_with_probability<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        probability: &[Vec<f64>],
    ) -> Result<Vec<usize>> {
        if probability.len() != self.len() {
            return Err(EnvError::Configuration(format!(
                "expected {} probability vectors, got {}",
                self.len(),
                probability.len()
            )));
        }

        let mut weighted = Vec::with_capacity(self.len());
        for (position, weights) in probability.iter().enumerate() {
            if weights.len() != self.sizes[position] {
                return Err(EnvError::Configuration(format!(
                    "position {position} has {} values but {} weights",
                    self.sizes[position],
                    weights.len()
                )));
            }
            let index = WeightedIndex::new(weights).map_err(|e| {
                EnvError::Configuration(format!("position {position}: {e}"))
            })?;
            weighted.push(index);
        }

        self.sample_until_unique(rng, |rng, position| {
            self.starts[position] + weighted[position].sample(rng)
        })
    }

    fn sample_until_unique<R, F>(&self, rng: &mut R, mut draw: F) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R, usize) -> usize,
    {
        let mut attempts = 0;
        loop {
            let candidate: Vec<usize> = (0..self.len()).map(|i| draw(rng, i)).collect();
            if all_distinct(&candidate) {
                return Ok(candidate);
            }
            attempts += 1;
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(EnvError::SamplingExhausted { attempts });
            }
        }
    }

    // == Contains ==
    /// True iff `candidate` has one in-range value per position and no repeats.
    pub fn contains(&self, candidate: &[usize]) -> bool {
        candidate.len() == self.len()
            && candidate
                .iter()
                .enumerate()
                .all(|(i, value)| self.range(i).contains(value))
            && all_distinct(candidate)
    }
}

fn all_distinct(values: &[usize]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(*v))
}
