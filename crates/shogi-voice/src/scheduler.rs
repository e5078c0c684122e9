//! Converts resolved clip requests into sample-frame scheduling commands.

use std::sync::Arc;

use anyhow::Result;
use log::warn;

use crate::catalog::ClipCatalog;
use crate::compose::ClipRequest;
use crate::sink::{AudioSink, Segment};

/// Turns an ordered clip-request list into back-to-back [`Segment`]
/// submissions against the voice asset.
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    catalog: Arc<ClipCatalog>,
    sample_rate: u32,
}

impl PlaybackScheduler {
    pub fn new(catalog: Arc<ClipCatalog>, sample_rate: u32) -> Self {
        PlaybackScheduler {
            catalog,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Schedule `requests` in order, the first clip `start_offset` seconds
    /// from now, each subsequent clip immediately after its predecessor.
    ///
    /// Returns the cumulative duration consumed. A clip missing from the
    /// catalog is logged and skipped without advancing the offset; a sink
    /// submission failure aborts the call.
    pub fn schedule<S: AudioSink>(
        &self,
        sink: &mut S,
        requests: &[ClipRequest],
        start_offset: f64,
    ) -> Result<f64> {
        let rate = self.sample_rate as f64;
        let mut cursor = start_offset;
        for request in requests {
            let clip = match self.catalog.lookup(request.category, request.key) {
                Ok(clip) => clip,
                Err(e) => {
                    warn!("Skipping clip: {e}");
                    continue;
                }
            };
            sink.schedule_segment(Segment {
                start_frame: (cursor * rate).round() as u64,
                frame_count: (clip.duration() * rate).round() as u64,
                source_start: clip.start,
            })?;
            cursor += clip.duration();
        }
        Ok(cursor - start_offset)
    }
}
