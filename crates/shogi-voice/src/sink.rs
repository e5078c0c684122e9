//! Audio output capability consumed by the scheduler.

use anyhow::Result;

/// One scheduling command: play `frame_count` frames of the voice asset,
/// reading from `source_start` seconds into the recording, starting at
/// `start_frame` on the output timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start_frame: u64,
    pub frame_count: u64,
    pub source_start: f64,
}

/// Minimal segment-scheduling audio output.
///
/// Implementations: `KiraSink` (real playback, `kira-backend` feature),
/// [`RecordingSink`] (testing). Submission must not block; the backend plays
/// on its own thread. Submitted segments cannot be cancelled — `stop` exists
/// for session teardown only.
pub trait AudioSink {
    /// Submit one segment for playback at its scheduled output position.
    fn schedule_segment(&mut self, segment: Segment) -> Result<()>;

    /// Start (or keep) the output rolling. Called once per announcement,
    /// after its segments are submitted.
    fn play(&mut self) -> Result<()>;

    /// Stop all output immediately.
    fn stop(&mut self) -> Result<()>;

    /// Play a short out-of-band alert tone right now, bypassing the segment
    /// timeline.
    fn alert(&mut self) -> Result<()>;
}

/// Sink that records every command it receives. Used by the test suites to
/// assert on submitted frame ranges.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub segments: Vec<Segment>,
    pub play_calls: usize,
    pub stop_calls: usize,
    pub alert_calls: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for RecordingSink {
    fn schedule_segment(&mut self, segment: Segment) -> Result<()> {
        self.segments.push(segment);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stop_calls += 1;
        Ok(())
    }

    fn alert(&mut self) -> Result<()> {
        self.alert_calls += 1;
        Ok(())
    }
}
