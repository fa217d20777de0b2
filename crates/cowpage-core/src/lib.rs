//! # cowpage-core
//!
//! Core types for the cowpage private-mapping demo.
//!
//! This crate is platform-agnostic and contains no OS-specific code.
//! The mapping, fork and clock implementations are in `cowpage-runtime`.
//!
//! ## Modules
//!
//! - `error` - Error types
//! - `cancel` - Stop token for cooperative loop shutdown
//! - `clock` - Wall-clock and sleep abstraction
//! - `env` - Environment variable utilities

pub mod cancel;
pub mod clock;
pub mod env;
pub mod error;

// Re-exports for convenience
pub use cancel::StopToken;
pub use clock::{Clock, WallTime};
pub use env::{env_get, env_get_bool, env_get_opt};
pub use error::{CowError, CowResult, MemoryError, ProcessError};

/// Constants shared across the workspace
pub mod constants {
    /// Number of int32 slots the sampler uses (pid, seconds, microseconds)
    pub const SLOT_COUNT: usize = 3;

    /// Bytes per slot
    pub const SLOT_BYTES: usize = 4;

    /// Default sampling interval in milliseconds
    pub const DEFAULT_INTERVAL_MS: u64 = 1000;

    /// Page size used if the platform query fails
    pub const FALLBACK_PAGE_SIZE: usize = 4096;

    /// Value seeded into slot 0 before duplication
    pub const SEED_VALUE: i32 = 0x12345678;
}
