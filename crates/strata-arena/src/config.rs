//! Arena configuration parameters.

/// Configuration for an [`Arena`](crate::Arena).
///
/// All values are fixed once the arena is created; the backing block is
/// never resized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing block in bytes.
    ///
    /// Default: 1024, enough scratch space to load a pair of small
    /// shader sources.
    pub capacity: usize,

    /// Overwrite the used prefix of the block with [`POISON_BYTE`] on reset.
    ///
    /// Allocation always zero-fills, so poisoning only changes what a
    /// stale read would observe. Default: off.
    ///
    /// [`POISON_BYTE`]: ArenaConfig::POISON_BYTE
    pub poison_on_reset: bool,
}

impl ArenaConfig {
    /// Default block size in bytes.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Byte pattern written over dead memory when `poison_on_reset` is set.
    pub const POISON_BYTE: u8 = 0xA5;

    /// Create a config for a block of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            poison_on_reset: false,
        }
    }

    /// Enable or disable poisoning on reset.
    pub fn with_poison_on_reset(mut self, poison: bool) -> Self {
        self.poison_on_reset = poison;
        self
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_one_kib() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 1024);
        assert!(!config.poison_on_reset);
    }

    #[test]
    fn builder_sets_poison() {
        let config = ArenaConfig::new(64).with_poison_on_reset(true);
        assert_eq!(config.capacity, 64);
        assert!(config.poison_on_reset);
    }
}
