//! Synchronization parameter abstraction for deterministic testing.
//!
//! Decouples key selection from the system clock. Time-based pools derive
//! keys from the parameter, so production reads wall-clock milliseconds while
//! tests pin it to a fixed value.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the synchronization parameter passed to key pools.
///
/// # Invariants
///
/// - Implementations must be safe to call concurrently
/// - Both parties of a time-based exchange must read comparable values
///   (epoch milliseconds for [`SystemClock`])
pub trait ParameterSupplier: Send + Sync {
    /// Current parameter value.
    fn parameter(&self) -> i64;
}

impl<F> ParameterSupplier for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn parameter(&self) -> i64 {
        self()
    }
}

/// Production supplier: wall-clock time in milliseconds since the Unix epoch.
///
/// A clock set before the epoch yields negative values rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a system clock supplier.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterSupplier for SystemClock {
    fn parameter(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

/// Supplier that always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedParameter(pub i64);

impl ParameterSupplier for FixedParameter {
    fn parameter(&self) -> i64 {
        self.0
    }
}
