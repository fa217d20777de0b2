//! Error types for cowpage operations

use core::fmt;

/// Result type for cowpage operations
pub type CowResult<T> = Result<T, CowError>;

/// Errors that can occur when mapping, viewing or sampling a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CowError {
    /// Loop was stopped via StopToken
    Cancelled,

    /// Memory mapping failed
    Memory(MemoryError),

    /// Process duplication failed
    Process(ProcessError),
}

impl fmt::Display for CowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CowError::Cancelled => write!(f, "operation cancelled"),
            CowError::Memory(e) => write!(f, "memory error: {}", e),
            CowError::Process(e) => write!(f, "process error: {}", e),
        }
    }
}

impl std::error::Error for CowError {}

/// Memory-related errors
///
/// Variants that originate in a failed syscall carry the raw OS errno so
/// the platform diagnostic can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// mmap refused the mapping request
    AllocationFailed(i32),

    /// munmap failed
    UnmapFailed(i32),

    /// Zero-length region requested
    ZeroLength,

    /// Slot index outside the mapped region
    OutOfBounds { index: usize, count: usize },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::AllocationFailed(errno) => {
                write!(
                    f,
                    "memory allocation failed: {}",
                    std::io::Error::from_raw_os_error(*errno)
                )
            }
            MemoryError::UnmapFailed(errno) => {
                write!(
                    f,
                    "memory unmap failed: {}",
                    std::io::Error::from_raw_os_error(*errno)
                )
            }
            MemoryError::ZeroLength => write!(f, "zero-length region requested"),
            MemoryError::OutOfBounds { index, count } => {
                write!(f, "slot index {} out of bounds (region has {} slots)", index, count)
            }
        }
    }
}

impl From<MemoryError> for CowError {
    fn from(e: MemoryError) -> Self {
        CowError::Memory(e)
    }
}

/// Process duplication errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// fork failed
    DuplicationFailed(i32),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::DuplicationFailed(errno) => {
                write!(
                    f,
                    "process duplication failed: {}",
                    std::io::Error::from_raw_os_error(*errno)
                )
            }
        }
    }
}

impl From<ProcessError> for CowError {
    fn from(e: ProcessError) -> Self {
        CowError::Process(e)
    }
}
