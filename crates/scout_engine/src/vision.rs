//! Recovery path that reads a record off a screen capture instead of markup.
//!
//! Capture and analysis are external collaborators; this module only sequences
//! them and maps the best-effort answer into a canonical record.
use std::sync::Arc;

use scout_core::{has_primary_signal, BestEffortRecord, Record, RecordKind, ScoutError};
use scout_logging::scout_info;

/// An encoded screenshot as produced by a [`ScreenCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[async_trait::async_trait]
pub trait ScreenCapture: Send + Sync {
    /// Captures the live session showing `target_url`.
    async fn capture(&self, target_url: &str) -> Result<ImageHandle, ScoutError>;
}

#[async_trait::async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        image: &ImageHandle,
        kind: RecordKind,
    ) -> Result<BestEffortRecord, ScoutError>;
}

#[derive(Clone)]
pub struct VisionFallback {
    capture: Arc<dyn ScreenCapture>,
    analyzer: Arc<dyn VisionAnalyzer>,
}

impl VisionFallback {
    pub fn new(capture: Arc<dyn ScreenCapture>, analyzer: Arc<dyn VisionAnalyzer>) -> Self {
        Self { capture, analyzer }
    }

    /// Capture, then analyze, then map. Strictly sequential, single attempt each.
    pub async fn recover(
        &self,
        identifier: &str,
        kind: RecordKind,
        target_url: &str,
    ) -> Result<Record, ScoutError> {
        let image = self.capture.capture(target_url).await?;
        scout_info!(
            "Captured {} bytes ({}) for {:?} {}",
            image.bytes.len(),
            image.mime_type,
            kind,
            identifier
        );

        let best_effort = self.analyzer.analyze(&image, kind).await?;
        if best_effort.kind() != kind {
            return Err(ScoutError::vision_unavailable(format!(
                "analysis returned a {:?} record, expected {kind:?}",
                best_effort.kind()
            )));
        }

        let record = best_effort.into_record(identifier, target_url);
        if !has_primary_signal(&record) {
            return Err(ScoutError::vision_unavailable(
                "analysis found no name or title in the capture",
            ));
        }
        Ok(record)
    }
}
