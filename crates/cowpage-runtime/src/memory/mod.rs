//! Anonymous private memory regions
//!
//! Platform-specific implementations handle the actual mapping syscalls.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        pub use unix::page_size;
    }
}

use cowpage_core::constants::SLOT_BYTES;
use cowpage_core::error::{CowResult, MemoryError};

/// A private, anonymous, read-write mapping
///
/// The region is zero-initialized, backed by no file, and marked
/// `MAP_PRIVATE`: when the process is duplicated, parent and child keep
/// copy-on-write views of it and writes on one side are never observed by
/// the other. The mapping is released on drop or by an explicit [`unmap`].
///
/// [`unmap`]: MappedRegion::unmap
#[derive(Debug)]
pub struct MappedRegion {
    base: *mut u8,
    len: usize,
}

// The region is exclusively owned; nothing else aliases the mapping.
unsafe impl Send for MappedRegion {}

impl MappedRegion {
    /// Map `size_bytes` of private anonymous memory, rounded up to the
    /// platform page size
    ///
    /// Fails with `MemoryError::ZeroLength` for an empty request and
    /// `MemoryError::AllocationFailed` (carrying the OS errno) when the
    /// platform cannot satisfy the mapping.
    pub fn create(size_bytes: usize) -> CowResult<Self> {
        if size_bytes == 0 {
            return Err(MemoryError::ZeroLength.into());
        }

        let len = round_up_to_page(size_bytes, page_size())?;
        let base = unix::map_anonymous(len)?;
        log::debug!("mapped {} bytes at {:p} ({} requested)", len, base, size_bytes);

        Ok(Self { base, len })
    }

    /// Length of the mapping in bytes (always a page-size multiple)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Base address, for diagnostic printing only
    #[inline]
    pub fn base(&self) -> *const u8 {
        self.base
    }

    /// Read the int32 at byte `offset`
    ///
    /// # Safety
    ///
    /// The caller must keep `offset` 4-byte aligned and within the region;
    /// only `debug_assert!` guards this. Use [`Int32View`] for checked
    /// access.
    ///
    /// [`Int32View`]: crate::view::Int32View
    #[inline]
    pub unsafe fn read_int32(&self, offset: usize) -> i32 {
        debug_assert!(offset % SLOT_BYTES == 0);
        debug_assert!(offset + SLOT_BYTES <= self.len);
        (self.base.add(offset) as *const i32).read()
    }

    /// Write the int32 at byte `offset`
    ///
    /// # Safety
    ///
    /// Same contract as [`read_int32`](MappedRegion::read_int32).
    #[inline]
    pub unsafe fn write_int32(&self, offset: usize, value: i32) {
        debug_assert!(offset % SLOT_BYTES == 0);
        debug_assert!(offset + SLOT_BYTES <= self.len);
        (self.base.add(offset) as *mut i32).write(value);
    }

    /// Unmap the region explicitly, reporting any munmap failure
    pub fn unmap(self) -> CowResult<()> {
        let res = unix::unmap(self.base, self.len);
        std::mem::forget(self);
        res
    }
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        let _ = unix::unmap(self.base, self.len);
    }
}

fn round_up_to_page(size: usize, page: usize) -> CowResult<usize> {
    match size.checked_add(page - 1) {
        Some(n) => Ok(n / page * page),
        None => Err(MemoryError::AllocationFailed(libc::ENOMEM).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cowpage_core::error::CowError;

    #[test]
    fn test_page_size_is_positive_power_of_two() {
        let page = page_size();
        assert!(page > 0);
        assert!(page.is_power_of_two());
    }

    #[test]
    fn test_create_rounds_up_to_page() {
        let page = page_size();

        let region = MappedRegion::create(1).unwrap();
        assert_eq!(region.len(), page);

        let region = MappedRegion::create(page + 1).unwrap();
        assert_eq!(region.len(), 2 * page);

        let region = MappedRegion::create(page).unwrap();
        assert_eq!(region.len(), page);
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = MappedRegion::create(0).unwrap_err();
        assert_eq!(err, CowError::Memory(MemoryError::ZeroLength));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let region = MappedRegion::create(page_size()).unwrap();
        unsafe {
            region.write_int32(0, 0x12345678);
            region.write_int32(8, -1);
            assert_eq!(region.read_int32(0), 0x12345678);
            assert_eq!(region.read_int32(8), -1);
        }
    }

    #[test]
    fn test_fresh_region_reads_zero() {
        let region = MappedRegion::create(page_size()).unwrap();
        unsafe {
            assert_eq!(region.read_int32(0), 0);
            assert_eq!(region.read_int32(region.len() - 4), 0);
        }
    }

    #[test]
    fn test_explicit_unmap() {
        let region = MappedRegion::create(page_size()).unwrap();
        region.unmap().unwrap();
    }

    #[test]
    fn test_allocation_failure_reports_diagnostic() {
        // No kernel will hand out half the address space.
        let err = MappedRegion::create(usize::MAX / 2).unwrap_err();
        match err {
            CowError::Memory(MemoryError::AllocationFailed(errno)) => {
                assert_ne!(errno, 0);
                assert!(!format!("{}", err).is_empty());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
