//! Assembly configuration.

use sfera_terms::DEFAULT_THRESHOLD;

/// Configuration for operator-matrix assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyConfig {
    /// Entries with norm at or below this value are not stored.
    pub threshold: f64,
    /// Reject entries whose imaginary part exceeds the threshold.
    pub real_only: bool,
    /// Worker threads; `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            real_only: false,
            num_threads: None,
        }
    }
}

impl AssemblyConfig {
    /// Sets the entry threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Requires every stored entry to be real.
    #[must_use]
    pub fn with_real_only(mut self, real_only: bool) -> Self {
        self.real_only = real_only;
        self
    }

    /// Runs assembly on a dedicated pool of `num_threads` workers.
    #[must_use]
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }
}
