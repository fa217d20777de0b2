//! Stop token for cooperative loop shutdown
//!
//! The sampling loop checks its token at the top of every iteration and
//! exits with `CowError::Cancelled` once the token is stopped. Tokens can
//! be linked to form parent-child relationships.
//!
//! A token that crosses a fork is duplicated like any other memory, so
//! after duplication each process stops (or keeps running) on its own.

use crate::error::{CowError, CowResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token for checking and requesting loop shutdown
///
/// Clones share the same flag. When stopped, loop operations return
/// `Err(CowError::Cancelled)`.
#[derive(Clone)]
pub struct StopToken {
    inner: Arc<Inner>,
}

struct Inner {
    /// Stop flag
    stopped: AtomicBool,

    /// Parent token (if any)
    parent: Option<StopToken>,
}

impl StopToken {
    /// Create a new independent stop token
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                stopped: AtomicBool::new(false),
                parent: None,
            }),
        }
    }

    /// Create a child token linked to this one
    ///
    /// If this token is stopped, checking the child also reports stopped.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                stopped: AtomicBool::new(false),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Check if shutdown was requested
    ///
    /// Also checks parent tokens recursively.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        if self.inner.stopped.load(Ordering::Acquire) {
            return true;
        }
        if let Some(ref parent) = self.inner.parent {
            return parent.is_stopped();
        }
        false
    }

    /// Request shutdown
    ///
    /// This only sets this token's flag, not the parent's. Child tokens
    /// see the stop when they check.
    pub fn stop(&self) {
        self.inner.stopped.store(true, Ordering::Release);
    }

    /// Check the token and return an error if stopped
    ///
    /// ```ignore
    /// fn run(token: &StopToken) -> CowResult<()> {
    ///     loop {
    ///         token.check()?; // Returns Err(Cancelled) once stopped
    ///         // ... do work ...
    ///     }
    /// }
    /// ```
    #[inline]
    pub fn check(&self) -> CowResult<()> {
        if self.is_stopped() {
            Err(CowError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for StopToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StopToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopToken")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_stop() {
        let token = StopToken::new();

        assert!(!token.is_stopped());
        assert!(token.check().is_ok());

        token.stop();

        assert!(token.is_stopped());
        assert!(matches!(token.check(), Err(CowError::Cancelled)));
    }

    #[test]
    fn test_child_token() {
        let parent = StopToken::new();
        let child = parent.child();

        assert!(!child.is_stopped());

        // Stopping the parent is visible through the child
        parent.stop();
        assert!(child.is_stopped());
    }

    #[test]
    fn test_child_independent_stop() {
        let parent = StopToken::new();
        let child = parent.child();

        // Stopping the child does NOT affect the parent
        child.stop();
        assert!(child.is_stopped());
        assert!(!parent.is_stopped());
    }

    #[test]
    fn test_clone_shares_state() {
        let token1 = StopToken::new();
        let token2 = token1.clone();

        token1.stop();
        assert!(token2.is_stopped());
    }
}
