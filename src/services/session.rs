use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::AbortHandle;

use crate::error::SessionError;
use crate::models::{CompressionRequest, CompressionResult};
use crate::services::Compressor;

/// Cancel-and-replace wrapper around a [`Compressor`].
///
/// Every [`submit`](Self::submit) supersedes the request before it. The
/// previous task is aborted if it has not started yet; if it is already
/// running its result is discarded and its caller gets
/// [`SessionError::Superseded`]. Only the newest request can publish to
/// [`latest`](Self::latest).
pub struct CompressionSession {
    compressor: Compressor,
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
    latest: RwLock<Option<Arc<CompressionResult>>>,
}

impl CompressionSession {
    pub fn new(compressor: Compressor) -> Self {
        Self {
            compressor,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            latest: RwLock::new(None),
        }
    }

    /// Compress `request`, superseding any request still in flight
    pub async fn submit(
        &self,
        request: CompressionRequest,
    ) -> Result<Arc<CompressionResult>, SessionError> {
        // Generation bump and handle swap happen under one lock so an older
        // submit can never abort a newer task.
        let (generation, handle) = {
            let mut in_flight = self.in_flight.lock().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let compressor = self.compressor.clone();
            let handle = tokio::task::spawn_blocking(move || compressor.compress(&request));
            if let Some(previous) = in_flight.replace(handle.abort_handle()) {
                previous.abort();
            }
            (generation, handle)
        };
        tracing::debug!(generation, "Submitted compression request");

        let outcome = handle.await;
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding superseded compression result");
            return Err(SessionError::Superseded);
        }

        let result = match outcome {
            Ok(result) => Arc::new(result?),
            Err(e) if e.is_cancelled() => return Err(SessionError::Superseded),
            Err(e) => return Err(SessionError::Task(e.to_string())),
        };

        let mut latest = self.latest.write().await;
        if !self.is_current(generation) {
            return Err(SessionError::Superseded);
        }
        *latest = Some(result.clone());
        Ok(result)
    }

    /// Most recent result published by a non-superseded request
    pub async fn latest(&self) -> Option<Arc<CompressionResult>> {
        self.latest.read().await.clone()
    }

    /// Number of requests submitted so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
