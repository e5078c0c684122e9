//! Announcement facade: the public operations and the playback cursor that
//! keeps announcements from overlapping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;
use shogi_model::{Color, Move};

use crate::catalog::{ClipCatalog, MiscClip};
use crate::compose::{ClipRequest, color_clip, compose};
use crate::scheduler::PlaybackScheduler;
use crate::sink::AudioSink;

/// Output sample rate assumed for the stock voice asset.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Speaks game events by queueing voice clips on an [`AudioSink`].
///
/// The engine owns the playback cursor: the wall-clock instant at which all
/// audio scheduled so far finishes. Every announcement is scheduled at
/// `max(now, cursor)` so back-to-back calls never overlap. All operations
/// take `&mut self`, which serializes callers by construction; share the
/// engine behind a mutex or a single-threaded task if needed.
///
/// Construction fails if the catalog (or the backend sink, built by the
/// caller) is unavailable; hosts should treat that as "announcements
/// disabled" rather than a fatal error.
pub struct AnnouncementEngine<S: AudioSink> {
    scheduler: PlaybackScheduler,
    sink: S,
    /// Seating color of the human listener; color announcements are labeled
    /// relative to it.
    perspective: Color,
    /// `None` while idle.
    busy_until: Option<Instant>,
}

impl<S: AudioSink> AnnouncementEngine<S> {
    /// Build an engine over the embedded clip catalog.
    pub fn new(sink: S, perspective: Color) -> Result<Self> {
        let catalog = Arc::new(ClipCatalog::load()?);
        Ok(Self::with_catalog(catalog, sink, perspective, DEFAULT_SAMPLE_RATE))
    }

    /// Build an engine over a caller-supplied catalog and sample rate.
    pub fn with_catalog(
        catalog: Arc<ClipCatalog>,
        sink: S,
        perspective: Color,
        sample_rate: u32,
    ) -> Self {
        AnnouncementEngine {
            scheduler: PlaybackScheduler::new(catalog, sample_rate),
            sink,
            perspective,
            busy_until: None,
        }
    }

    pub fn perspective(&self) -> Color {
        self.perspective
    }

    pub fn set_perspective(&mut self, perspective: Color) {
        self.perspective = perspective;
    }

    /// The instant all scheduled audio finishes, or `None` when idle.
    pub fn busy_until(&self) -> Option<Instant> {
        self.busy_until
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Announce one move. `previous` is the move it may be recapturing.
    pub fn announce_move(&mut self, mv: &Move, previous: Option<&Move>) -> Result<f64> {
        let requests = compose(mv, previous, self.perspective);
        self.speak(&requests)
    }

    /// Announce that the expected move was not the one played: warning
    /// phrase, then the expected move, then the trailing phrase.
    pub fn announce_wrong_move(&mut self, expected: &Move, previous: Option<&Move>) -> Result<f64> {
        let mut requests = vec![ClipRequest::misc(MiscClip::WrongMoveLeading)];
        requests.extend(compose(expected, previous, self.perspective));
        requests.push(ClipRequest::misc(MiscClip::WrongMoveTrailing));
        self.speak(&requests)
    }

    pub fn announce_resign(&mut self) -> Result<f64> {
        self.speak(&[ClipRequest::misc(MiscClip::Resign)])
    }

    pub fn announce_ready(&mut self) -> Result<f64> {
        self.speak(&[ClipRequest::misc(MiscClip::Ready)])
    }

    /// Announce whose turn it is, labeled for the listener's seat.
    pub fn announce_turn(&mut self, color: Color) -> Result<f64> {
        self.speak(&[
            ClipRequest::misc(color_clip(color, self.perspective)),
            ClipRequest::misc(MiscClip::Turn),
        ])
    }

    pub fn announce_aborted(&mut self) -> Result<f64> {
        self.speak(&[ClipRequest::misc(MiscClip::Aborted)])
    }

    pub fn announce_error(&mut self) -> Result<f64> {
        self.speak(&[ClipRequest::misc(MiscClip::Error)])
    }

    pub fn announce_repetition(&mut self) -> Result<f64> {
        self.speak(&[ClipRequest::misc(MiscClip::Repetition)])
    }

    /// Out-of-band "ready for the next move" notification: an immediate
    /// alert tone, not a phrase. Does not touch the cursor.
    pub fn announce_next_move_ready(&mut self) -> Result<()> {
        self.sink.alert()
    }

    /// Forget the cursor, e.g. at the start of a new game. Already-submitted
    /// audio keeps playing.
    pub fn reset(&mut self) {
        self.busy_until = None;
    }

    /// Session teardown: silence the sink and return to idle.
    pub fn stop(&mut self) -> Result<()> {
        self.busy_until = None;
        self.sink.stop()
    }

    /// Schedule one phrase after everything already queued, then advance the
    /// cursor past it. Returns the phrase duration.
    fn speak(&mut self, requests: &[ClipRequest]) -> Result<f64> {
        let now = Instant::now();
        let offset = self
            .busy_until
            .map(|t| t.saturating_duration_since(now).as_secs_f64())
            .unwrap_or(0.0);

        let duration = self.scheduler.schedule(&mut self.sink, requests, offset)?;
        self.sink.play()?;
        self.busy_until = Some(now + Duration::from_secs_f64(offset + duration));
        debug!("Announcement queued: {} clips, {duration:.2}s after {offset:.2}s delay", requests.len());
        Ok(duration)
    }
}
