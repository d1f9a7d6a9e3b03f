//! CPU configuration.
//!
//! The defaults give the standard instruction semantics. [`Quirks`] switch a
//! few instructions to the behavior of older interpreters that some programs
//! were written against.

/// Compatibility switches. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` shift VY into VX instead of shifting VX in place.
    pub shift_reads_vy: bool,

    /// `FX55`/`FX65` leave I pointing past the last register transferred.
    pub load_store_increments_index: bool,
}

/// Construction-time settings for a [`CPU`](crate::CPU).
///
/// # Examples
///
/// ```
/// use libchip8::{Config, Quirks};
///
/// let config = Config::default()
///     .with_rng_seed(42)
///     .with_quirks(Quirks { shift_reads_vy: true, ..Quirks::default() });
/// assert_eq!(config.rng_seed, Some(42));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Seed for the `CXNN` random source. `None` seeds from the system clock.
    pub rng_seed: Option<u64>,

    /// Instruction compatibility switches.
    pub quirks: Quirks,
}

impl Config {
    /// Seeds the random source, making `CXNN` results repeatable across runs
    /// and across [`CPU::reset`](crate::CPU::reset).
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Replaces the compatibility switches.
    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }
}
