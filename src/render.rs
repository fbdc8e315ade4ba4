use crate::constants::CLEAR_COLOR;
use crate::core::{EqualizerUniforms, MeshId, Scene};
use glam::Vec2;
use web_sys as web;

mod plane;
use plane::{create_plane_pipeline, PlaneMesh, PlanePipeline};

/// wgpu-backed scene: the canvas surface plus every plane drawn into it, in
/// insertion order.
pub struct GpuScene {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    plane_pipeline: PlanePipeline,
    meshes: Vec<(MeshId, PlaneMesh)>,
    next_id: u32,
    // CSS viewport the planes are laid out in
    viewport: Vec2,
    clear_color: wgpu::Color,
}

impl GpuScene {
    pub async fn new(canvas: &web::HtmlCanvasElement, viewport: Vec2) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback needs downlevel limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let plane_pipeline = create_plane_pipeline(&device, format);
        log::info!("[render] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            plane_pipeline,
            meshes: Vec::new(),
            next_id: 0,
            viewport,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Reconfigure the surface for a new backing size and re-lay out every
    /// plane against the new CSS viewport.
    pub fn resize(&mut self, backing: (u32, u32), viewport: Vec2) {
        let (width, height) = backing;
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
        self.viewport = viewport;
        for (_, mesh) in &self.meshes {
            mesh.write_transform(&self.queue, viewport);
        }
    }

    pub fn draw(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.plane_pipeline.pipeline);
            for (_, mesh) in &self.meshes {
                mesh.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn mesh_index(&self, id: MeshId) -> Option<usize> {
        self.meshes.iter().position(|(mid, _)| *mid == id)
    }
}

impl Scene for GpuScene {
    fn add_plane(&mut self, size: Vec2, uniforms: &EqualizerUniforms) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        let mesh = PlaneMesh::new(
            &self.device,
            &self.plane_pipeline,
            size,
            self.viewport,
            uniforms,
        );
        self.meshes.push((id, mesh));
        id
    }

    fn set_scale(&mut self, id: MeshId, scale: Vec2) {
        if let Some(i) = self.mesh_index(id) {
            let viewport = self.viewport;
            self.meshes[i].1.set_scale(&self.queue, scale, viewport);
        }
    }

    fn write_uniforms(&mut self, id: MeshId, uniforms: &EqualizerUniforms) {
        if let Some(i) = self.mesh_index(id) {
            self.meshes[i].1.write_material(&self.queue, uniforms);
        }
    }

    fn remove(&mut self, id: MeshId) {
        if let Some(i) = self.mesh_index(id) {
            let (_, mesh) = self.meshes.remove(i);
            mesh.dispose();
        }
    }

    fn child_count(&self) -> usize {
        self.meshes.len()
    }
}
