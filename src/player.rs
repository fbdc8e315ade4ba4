use crate::audio::AudioController;
use crate::core::EqualizerHandle;
use crate::equalizer::EqualizerView;
use crate::manager::WebglManager;
use crate::render::GpuScene;
use web_sys as web;

/// Equalizer plus audio controller, with the controller's events feeding
/// the equalizer's inputs.
pub struct Player {
    equalizer: EqualizerView,
    audio: AudioController<EqualizerHandle<GpuScene>>,
}

impl Player {
    pub fn new(manager: &WebglManager, mount: &web::HtmlElement) -> anyhow::Result<Self> {
        let mut equalizer = EqualizerView::new(manager.manager(), mount);
        let audio = match AudioController::new(mount, equalizer.handle()) {
            Ok(audio) => audio,
            Err(e) => {
                equalizer.destroy();
                return Err(e);
            }
        };
        Ok(Self { equalizer, audio })
    }

    pub fn destroy(&mut self) {
        self.equalizer.destroy();
        self.audio.destroy();
    }
}
