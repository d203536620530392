use super::{FraigError, Result};

/// Tuning knobs of a [`Fraig`] manager.
///
/// ```rust
/// use fraig::{Fraig, FraigConfig};
/// let config = FraigConfig::default()
///     .with_initial_pattern_words(4)
///     .with_max_retries(Some(100))
///     .with_seed(42);
/// let fraig = Fraig::with_config(config).unwrap();
/// assert_eq!(fraig.pattern_words(), 4);
/// ```
///
/// [`Fraig`]: crate::Fraig
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraigConfig {
    /// Number of random 64-bit pattern words every input starts with.
    pub initial_pattern_words: usize,
    /// Upper bound on the pattern storage, in words. Storage doubles until it reaches this
    /// bound, after which counterexamples are no longer folded.
    pub max_pattern_words: Option<usize>,
    /// Upper bound on the number of refinements performed while looking for an equivalent
    /// node during a single `make_and`.
    pub max_retries: Option<usize>,
    /// Seed of the random pattern generator.
    pub seed: u64,
}

impl Default for FraigConfig {
    fn default() -> Self {
        FraigConfig {
            initial_pattern_words: 2,
            max_pattern_words: None,
            max_retries: None,
            seed: 0x5eed_f4a1_6000_0001,
        }
    }
}

impl FraigConfig {
    pub fn with_initial_pattern_words(mut self, words: usize) -> Self {
        self.initial_pattern_words = words;
        self
    }

    pub fn with_max_pattern_words(mut self, words: Option<usize>) -> Self {
        self.max_pattern_words = words;
        self
    }

    pub fn with_max_retries(mut self, retries: Option<usize>) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_pattern_words == 0 {
            return Err(FraigError::Config(
                "initial_pattern_words must be at least 1".to_string(),
            ));
        }
        if let Some(max) = self.max_pattern_words {
            if max < self.initial_pattern_words {
                return Err(FraigError::Config(format!(
                    "max_pattern_words={} is smaller than initial_pattern_words={}",
                    max, self.initial_pattern_words
                )));
            }
        }
        Ok(())
    }
}
