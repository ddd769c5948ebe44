//! Prover configuration.

use crate::error::ProverError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable read by [ProverConfig::from_env].
pub const NUM_THREADS_ENV: &str = "HONK_NUM_THREADS";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Size of the rayon pool proofs are built in. `None` uses the global
    /// pool.
    pub num_threads: Option<usize>,
}

impl ProverConfig {
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Reads [NUM_THREADS_ENV]. A value that is not a positive integer is
    /// ignored.
    pub fn from_env() -> Self {
        let num_threads = match std::env::var(NUM_THREADS_ENV) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    warn!(value, "ignoring {NUM_THREADS_ENV}");
                    None
                }
            },
            Err(_) => None,
        };
        Self { num_threads }
    }

    /// Runs `op` in a dedicated pool of `num_threads` threads, or in the
    /// current one.
    pub fn install<OP, R>(&self, op: OP) -> Result<R, ProverError>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.num_threads {
            None => Ok(op()),
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| ProverError::ThreadPool(e.to_string()))?;
                Ok(pool.install(op))
            }
        }
    }
}
