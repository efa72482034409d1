//! src/control.rs
use crate::error::PipelineError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Cooperative cancellation shared with signal handlers.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Handle for `signal_hook::flag::register`.
    pub fn as_arc(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Checked by map and reduce tasks between records and between keys.
#[derive(Debug, Default)]
pub struct RunControl {
    cancellation: CancellationFlag,
    rejected: AtomicU64,
    max_rejected: Option<u64>,
}

impl RunControl {
    pub fn new(cancellation: CancellationFlag, max_rejected: Option<u64>) -> Self {
        RunControl {
            cancellation,
            rejected: AtomicU64::new(0),
            max_rejected,
        }
    }

    pub fn checkpoint(&self) -> Result<(), PipelineError> {
        if self.cancellation.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        Ok(())
    }

    pub fn record_rejection(&self) -> Result<(), PipelineError> {
        let rejected = self.rejected.fetch_add(1, Ordering::SeqCst) + 1;
        match self.max_rejected {
            Some(limit) if rejected > limit => Err(PipelineError::TooManyRejections { rejected, limit }),
            _ => Ok(()),
        }
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::SeqCst)
    }
}
