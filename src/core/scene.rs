use crate::core::callbacks::{CallbackHandle, Callbacks, ManagerEvent};
use crate::core::equalizer::EqualizerUniforms;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Width over height; 1.0 for a degenerate (zero height) viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Scene graph the equalizer inserts its shaded plane into.
pub trait Scene {
    /// Insert a plane of `size` (viewport units) with its material uniforms.
    fn add_plane(&mut self, size: Vec2, uniforms: &EqualizerUniforms) -> MeshId;
    /// Non-uniform scale applied on top of the plane's construction size.
    fn set_scale(&mut self, id: MeshId, scale: Vec2);
    fn write_uniforms(&mut self, id: MeshId, uniforms: &EqualizerUniforms);
    /// Detach the plane and release its geometry and material.
    fn remove(&mut self, id: MeshId);
    fn child_count(&self) -> usize;
}

/// Render-loop manager shared by everything drawn into one canvas.
///
/// Exposes the current viewport, the scene and the `resize`/`render`
/// subscription registry. Cloning shares the same state.
pub struct Manager<S> {
    viewport: Rc<Cell<Viewport>>,
    callbacks: Callbacks,
    scene: Rc<RefCell<S>>,
}

impl<S> Clone for Manager<S> {
    fn clone(&self) -> Self {
        Self {
            viewport: self.viewport.clone(),
            callbacks: self.callbacks.clone(),
            scene: self.scene.clone(),
        }
    }
}

impl<S: Scene> Manager<S> {
    pub fn new(scene: S, viewport: Viewport) -> Self {
        Self {
            viewport: Rc::new(Cell::new(viewport)),
            callbacks: Callbacks::new(),
            scene: Rc::new(RefCell::new(scene)),
        }
    }

    pub fn width(&self) -> f32 {
        self.viewport.get().width
    }

    pub fn height(&self) -> f32 {
        self.viewport.get().height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Shared cell subscribers read the live size from.
    pub fn viewport_handle(&self) -> Rc<Cell<Viewport>> {
        self.viewport.clone()
    }

    pub fn scene(&self) -> &Rc<RefCell<S>> {
        &self.scene
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    pub fn on(&self, event: ManagerEvent, callback: impl FnMut() + 'static) -> CallbackHandle {
        self.callbacks.add(event, callback)
    }

    /// Store the new size and notify `resize` subscribers.
    pub fn resize(&self, width: f32, height: f32) {
        self.viewport.set(Viewport::new(width, height));
        self.callbacks.fire(ManagerEvent::Resize);
    }

    /// Notify `render` subscribers; drawing happens afterwards.
    pub fn render_frame(&self) {
        self.callbacks.fire(ManagerEvent::Render);
    }
}
