//! # cowpage - private anonymous pages, independent after fork
//!
//! A small instructional library showing that a `MAP_PRIVATE` anonymous
//! mapping, written to and then inherited across a fork, is copy-on-write:
//! from the instant of duplication each process owns an independent view
//! of the page, and no synchronization is ever needed because no data is
//! shared anymore.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cowpage::{duplicate, map_one_page, Fork, Int32View};
//!
//! fn main() -> cowpage::CowResult<()> {
//!     let region = map_one_page()?;
//!     let mut view = Int32View::new(&region);
//!     view.set(0, 0x12345678)?;
//!
//!     match duplicate()? {
//!         // Both processes read 0x12345678 here; once either writes,
//!         // the views diverge for good.
//!         Fork::Parent { .. } => view.set(0, 1)?,
//!         Fork::Child => view.set(0, 2)?,
//!     }
//!     println!("{}: {}", cowpage::current_pid(), view.get(0)?);
//!     Ok(())
//! }
//! ```

// Re-export core types
pub use cowpage_core::{
    constants, CowError, CowResult, MemoryError, ProcessError, StopToken,
};

// Re-export the clock abstraction
pub use cowpage_core::clock::{Clock, WallTime};

// Re-export env utilities
pub use cowpage_core::{env_get, env_get_bool, env_get_opt};

// Re-export runtime types
pub use cowpage_runtime::{
    current_pid, duplicate, page_size, Fork, Int32View, MappedRegion, SampledState, Sampler,
    SamplerConfig, SystemClock,
};

/// Map a single page of private anonymous memory
///
/// Convenience for the common case; the demo and most tests need exactly
/// one page.
pub fn map_one_page() -> CowResult<MappedRegion> {
    MappedRegion::create(page_size())
}
