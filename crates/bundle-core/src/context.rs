//! Per-call resolution context
//!
//! A [`ResolveContext`] carries the base directory relative file references
//! are joined onto, plus the caller's cancellation flag and deadline. It is
//! checked before every fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use bundle_fs::NormalizedPath;
use bundle_model::FileRef;

use crate::error::{Error, Result};

/// Shareable cancellation flag.
///
/// Clones observe the same flag, so a token handed to a resolution can be
/// cancelled from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    base: Option<NormalizedPath>,
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
}

impl ResolveContext {
    /// Context with no base directory, cancellation or deadline.
    ///
    /// Relative references then resolve against whatever the reader uses,
    /// usually the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for resolving a bundle stored at `entry_file`.
    pub fn for_file(entry_file: &NormalizedPath) -> Self {
        let mut ctx = Self::new();
        ctx.base = entry_file.parent();
        ctx
    }

    pub fn with_base(mut self, base: impl Into<NormalizedPath>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn base(&self) -> Option<&NormalizedPath> {
        self.base.as_ref()
    }

    /// Fail if no further fetch may be issued for `url`.
    pub fn check(&self, url: &str) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled {
                url: url.to_string(),
            });
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(Error::DeadlineExceeded {
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// The reference a reader should fetch: relative local paths are joined
    /// onto the base directory.
    pub fn locate(&self, file: &FileRef) -> FileRef {
        match &self.base {
            Some(base) => file.relative_to(base),
            None => file.clone(),
        }
    }
}
