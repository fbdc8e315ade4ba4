use crate::core::callbacks::{Disposer, ManagerEvent};
use crate::core::constants::{ACTIVE_LERP, INTENSITY_LERP, TIME_STEP};
use crate::core::scene::{Manager, MeshId, Scene, Viewport};
use crate::core::settings::{hex_to_rgb, SettingKey, SettingValue, VisualSettings};
use crate::core::smoothing::Smoothed;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Material uniforms of the equalizer plane. Layout matches
/// `EqualizerUniforms` in `shaders/equalizer.wgsl` (80 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EqualizerUniforms {
    pub color1: [f32; 3],
    pub aspect: f32,
    pub color2: [f32; 3],
    pub time: f32,
    pub bass_intensity: f32,
    pub high_intensity: f32,
    pub active_progress: f32,
    pub is_full: f32,
    pub radius: f32,
    pub step: f32,
    pub time_acceleration: f32,
    pub radius_acceleration: f32,
    pub radius_distortion: f32,
    pub _pad: [f32; 3],
}

/// Everything the equalizer animates, independent of the scene.
#[derive(Clone, Debug)]
pub struct EqualizerState {
    start: Viewport,
    scale: Vec2,
    aspect: f32,
    time: f32,
    bass: Smoothed,
    high: Smoothed,
    active: bool,
    active_progress: Smoothed,
    settings: VisualSettings,
}

impl EqualizerState {
    pub fn new(start: Viewport, settings: VisualSettings) -> Self {
        Self {
            start,
            scale: Vec2::ONE,
            aspect: start.aspect(),
            time: 0.0,
            bass: Smoothed::default(),
            high: Smoothed::default(),
            active: false,
            active_progress: Smoothed::default(),
            settings,
        }
    }

    pub fn start_size(&self) -> Viewport {
        self.start
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn bass(&self) -> Smoothed {
        self.bass
    }

    pub fn high(&self) -> Smoothed {
        self.high
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn active_progress(&self) -> f32 {
        self.active_progress.current
    }

    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    pub fn set_bass_target(&mut self, value: f32) {
        self.bass.set_target(value.clamp(0.0, 1.0));
    }

    pub fn set_high_target(&mut self, value: f32) {
        self.high.set_target(value.clamp(0.0, 1.0));
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.active_progress.set_target(if active { 1.0 } else { 0.0 });
    }

    pub fn apply_setting(&mut self, key: SettingKey, value: SettingValue) -> bool {
        self.settings.set(key, value)
    }

    /// Per-axis scale keeping the plane covering `viewport`. A zero start
    /// dimension keeps that axis at 1.
    pub fn scale_for(&self, viewport: Viewport) -> Vec2 {
        let axis = |now: f32, start: f32| if start > 0.0 { now / start } else { 1.0 };
        Vec2::new(
            axis(viewport.width, self.start.width),
            axis(viewport.height, self.start.height),
        )
    }

    pub fn resize(&mut self, viewport: Viewport) -> Vec2 {
        self.scale = self.scale_for(viewport);
        self.aspect = viewport.aspect();
        self.scale
    }

    /// One render frame: advance time and chase every smoothed target.
    pub fn advance(&mut self) {
        self.time += TIME_STEP;
        self.bass.step(INTENSITY_LERP);
        self.high.step(INTENSITY_LERP);
        self.active_progress.step(ACTIVE_LERP);
    }

    pub fn uniforms(&self) -> EqualizerUniforms {
        let s = &self.settings;
        EqualizerUniforms {
            color1: hex_to_rgb(s.color1),
            aspect: self.aspect,
            color2: hex_to_rgb(s.color2),
            time: self.time,
            bass_intensity: self.bass.current,
            high_intensity: self.high.current,
            active_progress: self.active_progress.current,
            is_full: if s.is_full { 1.0 } else { 0.0 },
            radius: s.radius,
            step: s.step,
            time_acceleration: s.time_acceleration,
            radius_acceleration: s.radius_acceleration,
            radius_distortion: s.radius_distortion,
            _pad: [0.0; 3],
        }
    }
}

struct Shared<S> {
    state: RefCell<EqualizerState>,
    scene: Rc<RefCell<S>>,
    mesh: Cell<Option<MeshId>>,
}

impl<S: Scene> Shared<S> {
    fn flush(&self) {
        let Some(mesh) = self.mesh.get() else {
            return;
        };
        let uniforms = self.state.borrow().uniforms();
        self.scene.borrow_mut().write_uniforms(mesh, &uniforms);
    }
}

/// Full-screen shaded plane driven by smoothed audio intensities.
///
/// Subscribes to the manager's `resize` and `render` events on construction
/// and unsubscribes in [`Equalizer::destroy`].
pub struct Equalizer<S: Scene + 'static> {
    shared: Rc<Shared<S>>,
    subscriptions: Disposer,
}

impl<S: Scene + 'static> Equalizer<S> {
    pub fn new(manager: &Manager<S>) -> Self {
        Self::with_settings(manager, VisualSettings::default())
    }

    pub fn with_settings(manager: &Manager<S>, settings: VisualSettings) -> Self {
        let state = EqualizerState::new(manager.viewport(), settings);
        let scene = manager.scene().clone();
        let mesh = scene
            .borrow_mut()
            .add_plane(state.start_size().size(), &state.uniforms());
        let shared = Rc::new(Shared {
            state: RefCell::new(state),
            scene,
            mesh: Cell::new(Some(mesh)),
        });

        let mut subscriptions = Disposer::new();

        let on_resize = shared.clone();
        let viewport = manager.viewport_handle();
        subscriptions.push_callback(manager.on(ManagerEvent::Resize, move || {
            let Some(mesh) = on_resize.mesh.get() else {
                return;
            };
            let scale = on_resize.state.borrow_mut().resize(viewport.get());
            on_resize.scene.borrow_mut().set_scale(mesh, scale);
            on_resize.flush();
        }));

        let on_render = shared.clone();
        subscriptions.push_callback(manager.on(ManagerEvent::Render, move || {
            on_render.state.borrow_mut().advance();
            on_render.flush();
        }));

        log::debug!("[equalizer] created mesh {:?}", mesh);
        Self {
            shared,
            subscriptions,
        }
    }

    pub fn handle(&self) -> EqualizerHandle<S> {
        EqualizerHandle {
            shared: self.shared.clone(),
        }
    }

    pub fn state(&self) -> EqualizerState {
        self.shared.state.borrow().clone()
    }

    pub fn mesh(&self) -> Option<MeshId> {
        self.shared.mesh.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.mesh.get().is_none()
    }

    /// Remove the plane, release its GPU resources and drop both
    /// subscriptions. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(mesh) = self.shared.mesh.take() {
            self.shared.scene.borrow_mut().remove(mesh);
            log::debug!("[equalizer] removed mesh {:?}", mesh);
        }
        self.subscriptions.dispose();
    }
}

/// Cloneable input side of an [`Equalizer`]: intensity targets, activity and
/// settings.
pub struct EqualizerHandle<S: Scene> {
    shared: Rc<Shared<S>>,
}

impl<S: Scene> Clone for EqualizerHandle<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: Scene> EqualizerHandle<S> {
    pub fn set_bass_intensity(&self, value: f32) {
        self.shared.state.borrow_mut().set_bass_target(value);
    }

    pub fn set_high_intensity(&self, value: f32) {
        self.shared.state.borrow_mut().set_high_target(value);
    }

    pub fn set_active(&self, active: bool) {
        self.shared.state.borrow_mut().set_active(active);
    }

    /// Assign a visual setting and write it to the material immediately.
    pub fn apply_setting(&self, key: SettingKey, value: SettingValue) -> bool {
        let changed = self.shared.state.borrow_mut().apply_setting(key, value);
        if changed {
            self.shared.flush();
        }
        changed
    }

    pub fn settings(&self) -> VisualSettings {
        self.shared.state.borrow().settings().clone()
    }

    pub fn uniforms(&self) -> EqualizerUniforms {
        self.shared.state.borrow().uniforms()
    }
}
