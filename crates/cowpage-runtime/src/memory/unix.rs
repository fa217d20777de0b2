//! Unix mapping implementation using mmap

use cowpage_core::constants::FALLBACK_PAGE_SIZE;
use cowpage_core::error::{CowResult, MemoryError};
use nix::errno::Errno;
use std::ptr;

/// Platform page size in bytes
pub fn page_size() -> usize {
    let ret = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if ret > 0 {
        ret as usize
    } else {
        FALLBACK_PAGE_SIZE
    }
}

/// Map `len` bytes of zero-initialized, private, anonymous, read-write
/// memory
pub(super) fn map_anonymous(len: usize) -> CowResult<*mut u8> {
    let base = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };

    if base == libc::MAP_FAILED {
        return Err(MemoryError::AllocationFailed(Errno::last_raw()).into());
    }

    Ok(base as *mut u8)
}

pub(super) fn unmap(base: *mut u8, len: usize) -> CowResult<()> {
    let ret = unsafe { libc::munmap(base as *mut libc::c_void, len) };
    if ret != 0 {
        return Err(MemoryError::UnmapFailed(Errno::last_raw()).into());
    }

    Ok(())
}
