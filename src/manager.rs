use crate::constants::CANVAS_CLASS;
use crate::core::{Disposer, FrameLoop, Manager, Viewport};
use crate::dom;
use crate::render::GpuScene;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameClosure = Closure<dyn FnMut()>;

/// Owns the canvas, the GPU scene and the requestAnimationFrame loop.
///
/// Each frame applies a pending resize (firing `resize`), fires `render`
/// and then draws the scene.
pub struct WebglManager {
    manager: Manager<GpuScene>,
    canvas: web::HtmlCanvasElement,
    resize_pending: Rc<Cell<bool>>,
    frames: Rc<FrameLoop<FrameClosure>>,
    listeners: Disposer,
}

impl WebglManager {
    /// Append a full-size canvas to `container` and bring up the GPU scene.
    pub async fn new(container: &web::HtmlElement) -> anyhow::Result<Self> {
        let document = dom::document()?;
        let canvas: web::HtmlCanvasElement = dom::create(&document, "canvas")?;
        canvas.set_class_name(CANVAS_CLASS);
        _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;

        let backing = dom::sync_canvas_backing_size(&canvas);
        let (width, height) = dom::css_size(&canvas);
        let viewport = Viewport::new(width, height);
        let scene = match GpuScene::new(&canvas, viewport.size()).await {
            Ok(scene) => scene,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        log::info!(
            "[manager] viewport {:.0}x{:.0} (backing {}x{})",
            width,
            height,
            backing.0,
            backing.1
        );

        let resize_pending = Rc::new(Cell::new(false));
        let mut listeners = Disposer::new();
        if let Some(window) = web::window() {
            let pending = resize_pending.clone();
            let listener = dom::listen(&window, "resize", move |_| pending.set(true));
            listeners.push(move || listener.remove());
        }

        Ok(Self {
            manager: Manager::new(scene, viewport),
            canvas,
            resize_pending,
            frames: Rc::new(FrameLoop::new()),
            listeners,
        })
    }

    pub fn manager(&self) -> &Manager<GpuScene> {
        &self.manager
    }

    /// Start the frame loop. Calling it while running does nothing.
    pub fn play(&self) {
        if self.frames.is_running() {
            return;
        }
        let manager = self.manager.clone();
        let canvas = self.canvas.clone();
        let pending = self.resize_pending.clone();
        let frames = self.frames.clone();
        let tick = Closure::wrap(Box::new(move || {
            if let Some(stale) = frames.release_if_stopped() {
                // Breaks the loop <-> closure cycle once this frame returns
                dom::drop_later(stale);
                return;
            }
            if pending.replace(false) {
                apply_resize(&manager, &canvas);
            }
            manager.render_frame();
            if let Err(e) = manager.scene().borrow_mut().draw() {
                log::error!("render error: {:?}", e);
            }
            request_frame(&frames);
        }) as Box<dyn FnMut()>);
        if self.frames.start(tick) {
            request_frame(&self.frames);
        }
    }

    /// Stop the loop, drop the window listener and remove the canvas.
    pub fn destroy(&mut self) {
        // The queued frame releases the tick closure
        self.frames.stop();
        self.listeners.dispose();
        self.canvas.remove();
    }
}

fn request_frame(frames: &FrameLoop<FrameClosure>) {
    let Some(w) = web::window() else {
        return;
    };
    frames.with_tick(|cb| {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    });
}

fn apply_resize(manager: &Manager<GpuScene>, canvas: &web::HtmlCanvasElement) {
    let backing = dom::sync_canvas_backing_size(canvas);
    let (width, height) = dom::css_size(canvas);
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    // Scene first so planes rescale against the new viewport
    manager
        .scene()
        .borrow_mut()
        .resize(backing, glam::Vec2::new(width, height));
    manager.resize(width, height);
}
