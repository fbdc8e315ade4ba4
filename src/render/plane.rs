use crate::core::EqualizerUniforms;
use glam::Vec2;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PlaneVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

const PLANE_INDICES: [u16; 6] = [0, 2, 1, 2, 3, 1];

// Object transform of a plane: construction size, scale and live viewport
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshUniforms {
    pub(crate) plane_size: [f32; 2],
    pub(crate) scale: [f32; 2],
    pub(crate) viewport: [f32; 2],
    pub(crate) _pad: [f32; 2],
}

/// Centered plane of `size`, uv (0,0) bottom-left.
fn plane_vertices(size: Vec2) -> [PlaneVertex; 4] {
    let h = size * 0.5;
    [
        PlaneVertex {
            position: [-h.x, h.y],
            uv: [0.0, 1.0],
        },
        PlaneVertex {
            position: [h.x, h.y],
            uv: [1.0, 1.0],
        },
        PlaneVertex {
            position: [-h.x, -h.y],
            uv: [0.0, 0.0],
        },
        PlaneVertex {
            position: [h.x, -h.y],
            uv: [1.0, 0.0],
        },
    ]
}

pub(crate) struct PlanePipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bgl: wgpu::BindGroupLayout,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub(crate) fn create_plane_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> PlanePipeline {
    let source = format!("{}\n{}", crate::core::NOISE_WGSL, crate::core::EQUALIZER_WGSL);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("equalizer_shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("plane_bgl"),
        entries: &[
            uniform_entry(0, wgpu::ShaderStages::VERTEX),
            uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("plane_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("plane_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_plane"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PlaneVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_equalizer"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    PlanePipeline { pipeline, bgl }
}

/// Geometry plus material of one plane in the scene.
pub(crate) struct PlaneMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    size: Vec2,
    scale: Vec2,
}

impl PlaneMesh {
    pub(crate) fn new(
        device: &wgpu::Device,
        pipeline: &PlanePipeline,
        size: Vec2,
        viewport: Vec2,
        uniforms: &EqualizerUniforms,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vertices"),
            contents: bytemuck::cast_slice(&plane_vertices(size)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_indices"),
            contents: bytemuck::cast_slice(&PLANE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let scale = Vec2::ONE;
        let mesh_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_transform"),
            contents: bytemuck::bytes_of(&mesh_uniforms(size, scale, viewport)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_material"),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plane_bg"),
            layout: &pipeline.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: mesh_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });
        Self {
            vertex_buffer,
            index_buffer,
            mesh_buffer,
            material_buffer,
            bind_group,
            size,
            scale,
        }
    }

    pub(crate) fn set_scale(&mut self, queue: &wgpu::Queue, scale: Vec2, viewport: Vec2) {
        self.scale = scale;
        self.write_transform(queue, viewport);
    }

    pub(crate) fn write_transform(&self, queue: &wgpu::Queue, viewport: Vec2) {
        let m = mesh_uniforms(self.size, self.scale, viewport);
        queue.write_buffer(&self.mesh_buffer, 0, bytemuck::bytes_of(&m));
    }

    pub(crate) fn write_material(&self, queue: &wgpu::Queue, uniforms: &EqualizerUniforms) {
        queue.write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
    }

    /// Release geometry and material buffers.
    pub(crate) fn dispose(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.mesh_buffer.destroy();
        self.material_buffer.destroy();
    }
}

fn mesh_uniforms(size: Vec2, scale: Vec2, viewport: Vec2) -> MeshUniforms {
    MeshUniforms {
        plane_size: size.to_array(),
        scale: scale.to_array(),
        viewport: viewport.to_array(),
        _pad: [0.0; 2],
    }
}
