//! Knobs for the synthesis pipeline.
//!
//! There is no file or environment configuration; a [`SynthConfig`] value is
//! built by the caller and passed down.

use std::sync::{
    Arc,
    atomic::{ AtomicBool, Ordering },
};

/// Default bound on the number of randomized completion trials.
pub const DEFAULT_MAX_RANDOM_TRIALS: usize = 10_000;

/// What to do with a supplied generator that is a product of earlier ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// Drop it if its sign agrees with the product it equals.
    #[default]
    Reduce,
    /// Fail with [`DependentGenerators`][crate::error::SynthError::DependentGenerators].
    Reject,
}

/// Cooperative cancellation flag for the randomized completion search.
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }

    /// Trip the flag. Any search holding a clone stops at its next trial.
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Parameters for [`synthesize_with`][crate::synthesize_with].
#[derive(Clone, Debug)]
pub struct SynthConfig {
    pub max_random_trials: usize,
    /// Seed for the completion search; `None` draws from system entropy.
    pub seed: Option<u64>,
    pub dependency_policy: DependencyPolicy,
    pub cancel: Option<CancelToken>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            max_random_trials: DEFAULT_MAX_RANDOM_TRIALS,
            seed: None,
            dependency_policy: DependencyPolicy::default(),
            cancel: None,
        }
    }
}

impl SynthConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_max_random_trials(mut self, trials: usize) -> Self {
        self.max_random_trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dependency_policy(mut self, policy: DependencyPolicy) -> Self {
        self.dependency_policy = policy;
        self
    }

    /// Shorthand for [`DependencyPolicy::Reject`].
    pub fn strict(self) -> Self {
        self.with_dependency_policy(DependencyPolicy::Reject)
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Return `true` if a cancel token is attached and has been tripped.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder() {
        let token = CancelToken::new();
        let config = SynthConfig::new()
            .with_seed(10546)
            .with_max_random_trials(5)
            .strict()
            .with_cancel(token.clone());
        assert_eq!(config.seed, Some(10546));
        assert_eq!(config.max_random_trials, 5);
        assert_eq!(config.dependency_policy, DependencyPolicy::Reject);
        assert!(!config.is_cancelled());
        token.cancel();
        assert!(config.is_cancelled());

        let default = SynthConfig::default();
        assert_eq!(default.max_random_trials, DEFAULT_MAX_RANDOM_TRIALS);
        assert_eq!(default.dependency_policy, DependencyPolicy::Reduce);
        assert!(!default.is_cancelled());
    }
}
