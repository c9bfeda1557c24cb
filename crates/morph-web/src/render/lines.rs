use super::helpers;
use glam::Mat4;
use morph_core::{GuideLayer, LineVertex};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LineUniforms {
    pub(crate) mvp: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

pub(crate) struct LinesResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bgl: wgpu::BindGroupLayout,
}

/// GPU side of one guide layer. Geometry is static; only uniforms change.
pub(crate) struct GuideDraw {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_lines_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> LinesResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lines_shader"),
        source: wgpu::ShaderSource::Wgsl(super::LINES_WGSL.into()),
    });
    let bgl = helpers::uniform_bind_group_layout(device, "lines_bgl");
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("lines_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let vertex_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    }];
    let pipeline = helpers::make_pipeline(
        device,
        "lines_pipeline",
        &pl,
        &shader,
        &vertex_buffers,
        wgpu::PrimitiveTopology::LineList,
        color_format,
        wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
    );
    LinesResources { pipeline, bgl }
}

impl LinesResources {
    pub(crate) fn create_draw(&self, device: &wgpu::Device, layer: &GuideLayer) -> GuideDraw {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("guide_vb"),
            contents: bytemuck::cast_slice(&layer.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = helpers::uniform_buffer::<LineUniforms>(device, "guide_uniforms");
        let bind_group = helpers::uniform_bind_group(device, "guide_bg", &self.bgl, &uniform_buffer);
        GuideDraw {
            vertex_buffer,
            vertex_count: layer.vertices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }
}

impl GuideDraw {
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, view_proj: Mat4, layer: &GuideLayer) {
        let u = LineUniforms {
            mvp: (view_proj * layer.model).to_cols_array_2d(),
            color: [layer.color[0], layer.color[1], layer.color[2], layer.opacity],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }
}
