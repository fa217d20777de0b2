//! # cowpage-runtime
//!
//! Platform-specific implementation for the cowpage demo: anonymous
//! private mappings, process duplication, the system clock and the
//! sampling loop.
//!
//! ## Modules
//!
//! - `memory` - `MappedRegion` over mmap
//! - `view` - Bounds-checked int32 view of a region
//! - `process` - fork wrapper with disjoint post-duplication views
//! - `clock` - gettimeofday-backed `Clock`
//! - `sampler` - The print/overwrite/sleep loop

pub mod clock;
pub mod memory;
pub mod process;
pub mod sampler;
pub mod view;

pub use clock::SystemClock;
pub use memory::{page_size, MappedRegion};
pub use process::{current_pid, duplicate, Fork};
pub use sampler::{SampledState, Sampler, SamplerConfig};
pub use view::Int32View;
