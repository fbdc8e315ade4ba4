use crate::core::intensity::IntensitySample;
use crate::core::player::PlayerSink;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio element to analyse yet")]
    NoMedia,
    #[error("audio context error: {0}")]
    Context(String),
}

/// Host analysis graph producing amplitude snapshots.
pub trait TimeDomainSource {
    /// Length of the snapshot buffer.
    fn bin_count(&self) -> usize;
    /// Fill `out` with the current time-domain bytes (128 = silence).
    fn read_time_domain(&self, out: &mut [u8]);
    /// Release the graph. Called at most once.
    fn close(&mut self);
}

/// Lifecycle of the lazily created analysis graph.
pub enum AnalysisState<S> {
    Uninitialized,
    Ready { source: S, buffer: Vec<u8> },
    Closed,
}

impl<S> AnalysisState<S> {
    pub fn is_ready(&self) -> bool {
        matches!(self, AnalysisState::Ready { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, AnalysisState::Closed)
    }
}

/// Playback-side logic of the audio controller.
///
/// Tracks whether a media element exists, owns the analysis graph once
/// playback has started and turns host media events into [`PlayerSink`]
/// calls.
pub struct AudioSession<S, K> {
    analysis: AnalysisState<S>,
    media_attached: bool,
    sink: K,
}

impl<S: TimeDomainSource, K: PlayerSink> AudioSession<S, K> {
    pub fn new(sink: K) -> Self {
        Self {
            analysis: AnalysisState::Uninitialized,
            media_attached: false,
            sink,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn analysis(&self) -> &AnalysisState<S> {
        &self.analysis
    }

    /// The playback element now exists.
    pub fn attach_media(&mut self) {
        self.media_attached = true;
    }

    pub fn has_media(&self) -> bool {
        self.media_attached
    }

    /// Build the analysis graph on first use.
    ///
    /// Returns `Ok(true)` only for the call that created it. Once ready or
    /// closed the graph is never rebuilt and `open` is not called.
    pub fn ensure_analysis<F>(&mut self, open: F) -> Result<bool, AudioError>
    where
        F: FnOnce() -> Result<S, AudioError>,
    {
        match self.analysis {
            AnalysisState::Ready { .. } | AnalysisState::Closed => return Ok(false),
            AnalysisState::Uninitialized => {}
        }
        if !self.media_attached {
            return Err(AudioError::NoMedia);
        }
        let source = open()?;
        let buffer = vec![0u8; source.bin_count()];
        log::debug!("[audio] analysis ready ({} bins)", buffer.len());
        self.analysis = AnalysisState::Ready { source, buffer };
        Ok(true)
    }

    /// Playback started. Returns whether this call created the analysis graph.
    pub fn handle_play<F>(&mut self, open: F) -> bool
    where
        F: FnOnce() -> Result<S, AudioError>,
    {
        let created = match self.ensure_analysis(open) {
            Ok(created) => created,
            Err(AudioError::NoMedia) => false,
            Err(e) => {
                log::warn!("[audio] analysis unavailable: {}", e);
                false
            }
        };
        self.sink.on_play();
        created
    }

    /// Media time update: sample the graph and emit an intensity update.
    ///
    /// Returns the raw snapshot for the debug overlay, or `None` while no
    /// graph exists.
    pub fn handle_time_update(&mut self) -> Option<&[u8]> {
        let AnalysisState::Ready { source, buffer } = &mut self.analysis else {
            return None;
        };
        source.read_time_domain(buffer);
        self.sink.on_update(IntensitySample::from_time_domain(buffer));
        Some(buffer.as_slice())
    }

    /// Pause resets the visual intensity before reporting the pause.
    pub fn handle_pause(&mut self) {
        self.sink.on_update(IntensitySample::SILENT);
        self.sink.on_pause();
    }

    /// Close the graph if it exists. Returns `true` only for the call that
    /// released it.
    pub fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.analysis, AnalysisState::Closed) {
            AnalysisState::Ready { mut source, .. } => {
                source.close();
                log::debug!("[audio] analysis closed");
                true
            }
            _ => false,
        }
    }
}
