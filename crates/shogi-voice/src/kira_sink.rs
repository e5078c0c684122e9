//! Kira-backed [`AudioSink`] for real playback.
//!
//! Holds the whole voice recording as one `StaticSoundData` and plays each
//! scheduled segment as a delayed slice of it. Kira mixes on its own thread,
//! so submission never blocks.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use kira::backend::DefaultBackend;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, StartTime, Tween};
use log::debug;

use crate::sink::{AudioSink, Segment};

pub struct KiraSink {
    manager: AudioManager,
    /// The full voice recording; segments play as slices of it.
    voice: StaticSoundData,
    /// Optional out-of-band alert tone.
    alert: Option<StaticSoundData>,
    /// Handles for everything still (possibly) playing, so `stop` can cut
    /// the session short.
    handles: Vec<StaticSoundHandle>,
    sample_rate: u32,
}

impl KiraSink {
    /// Open the default audio device and load the voice asset. Fails when
    /// either is unavailable; the host should then run without announcements.
    pub fn new(voice_asset: &Path, sample_rate: u32) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to open audio device: {e}"))?;
        let voice = StaticSoundData::from_file(voice_asset)
            .with_context(|| format!("Failed to load voice asset {}", voice_asset.display()))?;
        Ok(KiraSink {
            manager,
            voice,
            alert: None,
            handles: Vec::new(),
            sample_rate,
        })
    }

    /// Use `path` as the alert tone for [`AudioSink::alert`].
    pub fn with_alert_tone(mut self, path: &Path) -> Result<Self> {
        let data = StaticSoundData::from_file(path)
            .with_context(|| format!("Failed to load alert tone {}", path.display()))?;
        self.alert = Some(data);
        Ok(self)
    }

    fn prune_finished(&mut self) {
        use kira::sound::PlaybackState;
        self.handles
            .retain(|h| h.state() != PlaybackState::Stopped);
    }
}

impl AudioSink for KiraSink {
    fn schedule_segment(&mut self, segment: Segment) -> Result<()> {
        let rate = self.sample_rate as f64;
        let delay = segment.start_frame as f64 / rate;
        let end = segment.source_start + segment.frame_count as f64 / rate;

        let data = self
            .voice
            .clone()
            .slice(segment.source_start..end)
            .start_time(StartTime::Delayed(Duration::from_secs_f64(delay)));
        let handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to schedule segment: {e}"))?;
        self.handles.push(handle);
        self.prune_finished();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        // Kira starts delayed sounds on its own; nothing to kick.
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        for mut handle in self.handles.drain(..) {
            handle.stop(Tween::default());
        }
        Ok(())
    }

    fn alert(&mut self) -> Result<()> {
        match &self.alert {
            Some(data) => {
                let handle = self
                    .manager
                    .play(data.clone())
                    .map_err(|e| anyhow!("Failed to play alert tone: {e}"))?;
                self.handles.push(handle);
            }
            None => debug!("No alert tone configured"),
        }
        Ok(())
    }
}
