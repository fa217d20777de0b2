//! Process duplication
//!
//! A thin wrapper over fork. Duplication is the only concurrency-introducing
//! action in this crate, and it introduces no sharing: every private mapping
//! created before the call becomes copy-on-write at this instant, so the two
//! processes hold provably disjoint views and need no synchronization.

use cowpage_core::error::{CowResult, ProcessError};
use nix::unistd::{self, ForkResult, Pid};

/// Outcome of a process duplication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fork {
    /// Continuing in the original process
    Parent { child: Pid },

    /// Continuing in the new process
    Child,
}

/// Duplicate the current process
///
/// Both resulting processes continue from this call, each with its own
/// virtual-memory view of previously created private mappings: writes by
/// one are never observed by the other. There is no ordering guarantee
/// between which process resumes first.
///
/// The caller is expected to be single-threaded; only the calling thread
/// is carried into the child.
pub fn duplicate() -> CowResult<Fork> {
    match unsafe { unistd::fork() } {
        Ok(ForkResult::Parent { child }) => {
            log::debug!("duplicated, child pid {}", child);
            Ok(Fork::Parent { child })
        }
        Ok(ForkResult::Child) => Ok(Fork::Child),
        Err(errno) => Err(ProcessError::DuplicationFailed(errno as i32).into()),
    }
}

/// Current process id
#[inline]
pub fn current_pid() -> i32 {
    unistd::getpid().as_raw()
}
