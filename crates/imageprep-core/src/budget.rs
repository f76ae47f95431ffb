//! Process-wide destination byte budget for scaled-down decodes.
//!
//! The budget caps the byte size (`width * height * 4`) of buffers the
//! downsampler produces. It is read once per downsample call; the only
//! shared state is a pair of atomics, so concurrent readers are safe as
//! long as nothing mutates the setting mid-flight.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Bytes per pixel in every supported layout.
pub const BYTES_PER_PIXEL: u64 = 4;

/// Device memory tier, selecting the default byte budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceTier {
    /// Large-memory devices: 90 MB destination budget.
    Performance,
    /// The common case: 60 MB destination budget.
    #[default]
    Standard,
    /// Memory-constrained devices: 30 MB destination budget.
    Constrained,
}

impl DeviceTier {
    /// Default destination byte budget for this tier.
    pub const fn default_budget(self) -> u64 {
        match self {
            DeviceTier::Performance => 90 * 1024 * 1024,
            DeviceTier::Standard => 60 * 1024 * 1024,
            DeviceTier::Constrained => 30 * 1024 * 1024,
        }
    }

    const fn from_index(index: u8) -> Self {
        match index {
            0 => DeviceTier::Performance,
            2 => DeviceTier::Constrained,
            _ => DeviceTier::Standard,
        }
    }

    const fn index(self) -> u8 {
        match self {
            DeviceTier::Performance => 0,
            DeviceTier::Standard => 1,
            DeviceTier::Constrained => 2,
        }
    }
}

// 0 means "unset, use the tier default".
static CONFIGURED_BUDGET: AtomicU64 = AtomicU64::new(0);
static DEVICE_TIER: AtomicU8 = AtomicU8::new(DeviceTier::Standard.index());

/// The currently effective default byte budget: the configured value, or the
/// device tier's default when unset.
pub fn default_byte_budget() -> u64 {
    let configured = CONFIGURED_BUDGET.load(Ordering::Relaxed);
    if configured > 0 {
        configured
    } else {
        device_tier().default_budget()
    }
}

/// Override the default byte budget.
///
/// Silently ignored below the 4-byte floor (one pixel).
pub fn set_default_byte_budget(bytes: u64) {
    if bytes < BYTES_PER_PIXEL {
        return;
    }
    CONFIGURED_BUDGET.store(bytes, Ordering::Relaxed);
}

/// Select the device tier used when no explicit budget is configured.
pub fn set_device_tier(tier: DeviceTier) {
    DEVICE_TIER.store(tier.index(), Ordering::Relaxed);
}

/// The currently selected device tier.
pub fn device_tier() -> DeviceTier {
    DeviceTier::from_index(DEVICE_TIER.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_defaults() {
        assert_eq!(DeviceTier::Performance.default_budget(), 90 * 1024 * 1024);
        assert_eq!(DeviceTier::Standard.default_budget(), 60 * 1024 * 1024);
        assert_eq!(DeviceTier::Constrained.default_budget(), 30 * 1024 * 1024);
    }

    // Single test for the global: assertions stay ordered and other tests
    // never read CONFIGURED_BUDGET, so parallel test runs cannot interleave.
    #[test]
    fn configured_budget_overrides_tier_default() {
        assert_eq!(
            default_byte_budget(),
            DeviceTier::Standard.default_budget(),
            "unset budget should fall back to the standard tier"
        );

        // Below the floor: ignored.
        set_default_byte_budget(2);
        assert_eq!(default_byte_budget(), DeviceTier::Standard.default_budget());

        set_default_byte_budget(256 * 1024 * 1024);
        assert_eq!(default_byte_budget(), 256 * 1024 * 1024);
    }
}
