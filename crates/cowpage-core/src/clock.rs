//! Wall-clock and sleep abstraction
//!
//! The sampling loop never calls the platform clock directly; it goes
//! through this trait so tests can drive iterations without real
//! wall-clock waits. The production implementation lives in
//! `cowpage-runtime`.

use std::time::Duration;

/// A wall-clock sample split into seconds and microseconds
///
/// Both components are `i32` because they are stored into the region's
/// int32 slots as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Seconds component of the current wall-clock time
    pub secs: i32,

    /// Microseconds component (0..1_000_000)
    pub micros: i32,
}

/// Source of wall-clock time and blocking sleeps
pub trait Clock {
    /// Current wall-clock time
    fn wall_time(&self) -> WallTime;

    /// Block the calling process for `duration`
    ///
    /// This is a real blocking sleep, not a cooperative yield.
    fn sleep(&self, duration: Duration);
}
