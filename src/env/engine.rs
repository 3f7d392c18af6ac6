//! Cache Environment Engine
//!
//! Orchestrates one simulated request per step: draw the request, score it
//! against the cache, apply the agent's action, then age every entry.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheTable, PendingRequest, RequestGenerator, Tally};
use crate::config::Config;
use crate::env::{Action, Observation, Outcome, RewardPolicy};
use crate::error::{EnvError, Result};
use crate::space::{ActionSpace, ObservationSpace};

// == Step Types ==
/// Extra data returned by `reset` (always empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetInfo {}

/// Hit/miss history returned with every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub hits: Vec<u64>,
    pub misses: Vec<u64>,
}

/// Result of one `step`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    /// Always false: the simulation has no terminal state
    pub terminated: bool,
    /// Always false: episodes end only when the caller resets
    pub truncated: bool,
    pub info: StepInfo,
}

// == Cache Env ==
/// Variable-TTL cache simulation in front of a mock data store.
///
/// Not synchronised; one caller drives `step`/`reset` at a time.
#[derive(Debug)]
pub struct CacheEnv {
    config: Config,
    action_space: ActionSpace,
    observation_space: ObservationSpace,
    generator: RequestGenerator,
    policy: RewardPolicy,
    rng: StdRng,
    cache: CacheTable,
    previous_request: PendingRequest,
    tally: Tally,
}

impl CacheEnv {
    // == Constructor ==
    /// Validates `config` and builds an environment with a randomly filled cache.
    ///
    /// Row popularity is drawn once here and kept across resets.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = RequestGenerator::new(config.store_size, &mut rng)?;
        let cache =
            CacheTable::sample(config.cache_size, config.store_size, config.max_ttl, &mut rng)?;
        let previous_request = PendingRequest::uniform(config.store_size, &mut rng);

        info!(
            cache_size = config.cache_size,
            store_size = config.store_size,
            max_ttl = config.max_ttl,
            seeded = config.seed.is_some(),
            "cache environment created"
        );

        Ok(Self {
            action_space: ActionSpace::new(config.cache_size, config.max_ttl),
            observation_space: ObservationSpace::new(
                config.cache_size,
                config.store_size,
                config.max_ttl,
            ),
            config,
            generator,
            policy: RewardPolicy::default(),
            rng,
            cache,
            previous_request,
            tally: Tally::new(),
        })
    }

    // == Reset ==
    /// Refills the cache, clears the tally, and reseeds when `seed` is given.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, ResetInfo)> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.cache = CacheTable::sample(
            self.config.cache_size,
            self.config.store_size,
            self.config.max_ttl,
            &mut self.rng,
        )?;
        self.previous_request = PendingRequest::uniform(self.config.store_size, &mut self.rng);
        self.tally = Tally::new();

        info!(?seed, "environment reset");
        Ok((self.observation(), ResetInfo::default()))
    }

    // == Step ==
    /// Advances the simulation by one generated request.
    ///
    /// Fails with `InvalidAction` before touching any state if `action` is
    /// out of bounds.
    pub fn step(&mut self, action: Action) -> Result<StepResult> {
        self.check_action(&action)?;
        let request = self.generator.next_request(&mut self.rng);
        self.transition(action, request)
    }

    /// Advances the simulation with a caller-supplied request instead of a
    /// generated one (replaying traces, scripted scenarios).
    pub fn step_with_request(
        &mut self,
        action: Action,
        request: PendingRequest,
    ) -> Result<StepResult> {
        self.check_action(&action)?;
        if request.row >= self.config.store_size {
            return Err(EnvError::InvalidAction(format!(
                "requested row {} is outside 0..{}",
                request.row, self.config.store_size
            )));
        }
        self.transition(action, request)
    }

    fn check_action(&self, action: &Action) -> Result<()> {
        self.action_space.check(action).map_err(|e| {
            warn!(?action, error = %e, "rejected action");
            e
        })
    }

    fn transition(&mut self, action: Action, request: PendingRequest) -> Result<StepResult> {
        // Score against the cache as it was before the agent acts
        let cached = self.cache.lookup(request.row).and_then(|i| self.cache.slot(i));
        let outcome = self.policy.evaluate(&request, cached);
        if let Outcome::Write { cached: true } = outcome {
            self.cache.mark_dirty(request.row);
        }
        outcome.record(&mut self.tally);
        let reward = self.policy.reward(outcome);

        if let Action::Admit { slot, ttl } = action {
            self.cache.admit(slot, request.row, ttl)?;
        }
        // Uniform decay, including a slot admitted this step
        let evicted = self.cache.decay_and_evict();
        self.previous_request = request;

        debug!(
            kind = ?request.kind,
            row = request.row,
            ?outcome,
            reward,
            evicted,
            "step"
        );

        Ok(StepResult {
            observation: self.observation(),
            reward,
            terminated: false,
            truncated: false,
            info: StepInfo {
                hits: self.tally.hits().to_vec(),
                misses: self.tally.misses().to_vec(),
            },
        })
    }

    // == Export History ==
    /// Cumulative `(hits, misses)` per step, for plotting.
    pub fn export_history(&self) -> (Vec<u64>, Vec<u64>) {
        (self.tally.hits().to_vec(), self.tally.misses().to_vec())
    }

    // == Accessors ==
    pub fn observation(&self) -> Observation {
        Observation {
            previous_request: self.previous_request,
            cache: self.cache.snapshot(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    pub fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }

    pub fn cache(&self) -> &CacheTable {
        &self.cache
    }

    /// Mutable cache access for setting up scenarios.
    pub fn cache_mut(&mut self) -> &mut CacheTable {
        &mut self.cache
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }
}
