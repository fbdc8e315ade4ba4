use crate::core::equalizer::EqualizerHandle;
use crate::core::intensity::IntensitySample;
use crate::core::scene::Scene;

/// Receiver of the audio side's derived events.
pub trait PlayerSink {
    fn on_update(&mut self, sample: IntensitySample);
    fn on_play(&mut self);
    fn on_pause(&mut self);
}

// Player wiring: samples become intensity targets, play/pause the activity flag
impl<S: Scene> PlayerSink for EqualizerHandle<S> {
    fn on_update(&mut self, sample: IntensitySample) {
        let sample = sample.clamped();
        self.set_bass_intensity(sample.bass);
        self.set_high_intensity(sample.high);
    }

    fn on_play(&mut self) {
        self.set_active(true);
    }

    fn on_pause(&mut self) {
        self.set_active(false);
    }
}
