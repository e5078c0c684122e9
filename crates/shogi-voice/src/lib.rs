//! Spoken shogi move announcements.
//!
//! Announcements are built by concatenating short pre-recorded voice clips
//! (square names, piece names, qualifiers) cut from a single recording, and
//! queued on an audio sink so consecutive announcements never overlap.
//!
//! - [`ClipCatalog`]: immutable `(category, key)` → time-range table for the
//!   voice recording.
//! - [`compose`]: pure move-record → clip-sequence function.
//! - [`PlaybackScheduler`]: clip sequence → sample-frame segment commands.
//! - [`AnnouncementEngine`]: the public operations plus the playback cursor.
//!
//! The engine talks to any [`AudioSink`]; enable the `kira-backend` feature
//! for real output through [`KiraSink`], or use [`RecordingSink`] in tests.
//!
//! ```no_run
//! use shogi_model::{Color, Move, PieceCode, PieceKind, Promotion, Square, Suffix};
//! use shogi_voice::{AnnouncementEngine, RecordingSink};
//!
//! let mut engine = AnnouncementEngine::new(RecordingSink::new(), Color::Black)?;
//! engine.announce_ready()?;
//! engine.announce_move(
//!     &Move {
//!         color: Color::Black,
//!         from: Some(Square::new(7, 7)),
//!         to: Square::new(7, 6),
//!         piece: PieceCode::new(PieceKind::Pawn),
//!         promote: Promotion::None,
//!         suffix: Suffix::NONE,
//!     },
//!     None,
//! )?;
//! # anyhow::Ok(())
//! ```

mod catalog;
mod compose;
mod engine;
mod scheduler;
mod sink;

#[cfg(feature = "kira-backend")]
mod kira_sink;

pub use catalog::{Category, Clip, ClipCatalog, ClipNotFound, MiscClip, QualifierClip, SENTINEL_KEY};
pub use compose::{ClipRequest, color_clip, compose};
pub use engine::{AnnouncementEngine, DEFAULT_SAMPLE_RATE};
pub use scheduler::PlaybackScheduler;
pub use sink::{AudioSink, RecordingSink, Segment};

#[cfg(feature = "kira-backend")]
pub use kira_sink::KiraSink;
