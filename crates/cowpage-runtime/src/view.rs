//! Bounds-checked int32 view over a mapped region
//!
//! Raw offset arithmetic stays on `MappedRegion` behind `unsafe`; every
//! in-tree caller goes through this view, which validates slot indices
//! against the region length.

use crate::memory::MappedRegion;
use cowpage_core::constants::SLOT_BYTES;
use cowpage_core::error::{CowResult, MemoryError};

/// Typed view of a region as consecutive int32 slots
pub struct Int32View<'a> {
    region: &'a MappedRegion,
    count: usize,
}

impl<'a> Int32View<'a> {
    /// View `region` as `region.len() / 4` int32 slots
    pub fn new(region: &'a MappedRegion) -> Self {
        Self {
            count: region.len() / SLOT_BYTES,
            region,
        }
    }

    /// Number of slots the region holds
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Read slot `index`
    pub fn get(&self, index: usize) -> CowResult<i32> {
        self.bounds(index)?;
        Ok(unsafe { self.region.read_int32(index * SLOT_BYTES) })
    }

    /// Write slot `index`
    pub fn set(&mut self, index: usize, value: i32) -> CowResult<()> {
        self.bounds(index)?;
        unsafe { self.region.write_int32(index * SLOT_BYTES, value) };
        Ok(())
    }

    fn bounds(&self, index: usize) -> CowResult<()> {
        if index >= self.count {
            return Err(MemoryError::OutOfBounds {
                index,
                count: self.count,
            }
            .into());
        }
        Ok(())
    }
}
