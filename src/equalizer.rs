use crate::core::{Equalizer, EqualizerHandle, Manager};
use crate::panel::SettingsPanel;
use crate::render::GpuScene;
use web_sys as web;

/// The equalizer plane together with its debug control panel.
pub struct EqualizerView {
    equalizer: Equalizer<GpuScene>,
    panel: Option<SettingsPanel>,
}

impl EqualizerView {
    pub fn new(manager: &Manager<GpuScene>, mount: &web::HtmlElement) -> Self {
        let equalizer = Equalizer::new(manager);
        let handle = equalizer.handle();
        let settings = handle.settings();
        let panel = match SettingsPanel::new(mount, &settings, move |key, value| {
            handle.apply_setting(key, value);
        }) {
            Ok(panel) => Some(panel),
            Err(e) => {
                log::warn!("[equalizer] settings panel unavailable: {:?}", e);
                None
            }
        };
        Self { equalizer, panel }
    }

    pub fn handle(&self) -> EqualizerHandle<GpuScene> {
        self.equalizer.handle()
    }

    pub fn destroy(&mut self) {
        self.equalizer.destroy();
        if let Some(mut panel) = self.panel.take() {
            panel.destroy();
        }
    }
}
