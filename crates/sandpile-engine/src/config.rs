//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is checked once by [`Sandpile::new()`](crate::Sandpile::new);
//! all values are fixed for the lifetime of the driver.

use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`] or while building
/// the worker pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sequential cutoff is zero.
    #[error("cutoff must be at least 1 row, got {value}")]
    InvalidCutoff {
        /// The rejected cutoff.
        value: usize,
    },
    /// The requested worker count is zero or above [`EngineConfig::MAX_THREADS`].
    #[error("thread count must be in 1..={max}, got {value}")]
    InvalidThreadCount {
        /// The rejected thread count.
        value: usize,
        /// Upper bound accepted.
        max: usize,
    },
    /// `max_steps` is zero, which would never run a step.
    #[error("max_steps must be at least 1")]
    InvalidStepLimit,
    /// Rayon refused to build the dedicated pool.
    #[error("worker pool could not be built: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Tunables for the step driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Row ranges at or below this length are toppled sequentially.
    /// Default: 64.
    pub cutoff: usize,
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool.
    pub threads: Option<usize>,
    /// Upper bound on changing steps in [`Sandpile::stabilize()`](crate::Sandpile::stabilize).
    /// `None` runs until a fixed point.
    pub max_steps: Option<u64>,
}

impl EngineConfig {
    /// Default sequential cutoff in rows.
    pub const DEFAULT_CUTOFF: usize = 64;

    /// Largest dedicated pool accepted.
    pub const MAX_THREADS: usize = 1024;

    /// Set the sequential cutoff.
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Run on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Stop [`Sandpile::stabilize()`](crate::Sandpile::stabilize) after
    /// `max_steps` changing steps.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cutoff == 0 {
            return Err(ConfigError::InvalidCutoff { value: self.cutoff });
        }
        if let Some(n) = self.threads {
            if n == 0 || n > Self::MAX_THREADS {
                return Err(ConfigError::InvalidThreadCount {
                    value: n,
                    max: Self::MAX_THREADS,
                });
            }
        }
        if self.max_steps == Some(0) {
            return Err(ConfigError::InvalidStepLimit);
        }
        Ok(())
    }

    /// Build the dedicated pool, if one was requested.
    pub(crate) fn build_pool(&self) -> Result<Option<rayon::ThreadPool>, ConfigError> {
        let Some(threads) = self.threads else {
            return Ok(None);
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sandpile-worker-{i}"))
            .build()?;
        Ok(Some(pool))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cutoff: Self::DEFAULT_CUTOFF,
            threads: None,
            max_steps: None,
        }
    }
}
