use super::helpers;
use morph_core::ParticleBuffer;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) view_model: [[f32; 4]; 4],
    pub(crate) tint: [f32; 4],
    pub(crate) sprite: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pub(crate) pos: [f32; 3],
    pub(crate) color: [f32; 3],
}

pub(crate) struct PointsResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) quad_vb: wgpu::Buffer,
    pub(crate) instance_vb: wgpu::Buffer,
    pub(crate) capacity: usize,
    scratch: Vec<ParticleInstance>,
}

pub(crate) fn create_points_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    capacity: usize,
) -> PointsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(super::PARTICLES_WGSL.into()),
    });
    let bgl = helpers::uniform_bind_group_layout(device, "particles_bgl");
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: one instance per particle
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 2,
                },
            ],
        },
    ];
    let pipeline = helpers::make_pipeline(
        device,
        "particles_pipeline",
        &pl,
        &shader,
        &vertex_buffers,
        wgpu::PrimitiveTopology::TriangleList,
        color_format,
        helpers::ADDITIVE_BLEND,
    );

    let uniform_buffer = helpers::uniform_buffer::<PointUniforms>(device, "particles_uniforms");
    let bind_group = helpers::uniform_bind_group(device, "particles_bg", &bgl, &uniform_buffer);

    // Two triangles spanning [-1, 1]²
    let quad_vertices: [f32; 12] = [
        -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0,
    ];
    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particles_quad_vb"),
        contents: bytemuck::cast_slice(&quad_vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let capacity = capacity.max(1);
    let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("particles_instance_vb"),
        size: (std::mem::size_of::<ParticleInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    PointsResources {
        pipeline,
        uniform_buffer,
        bind_group,
        quad_vb,
        instance_vb,
        capacity,
        scratch: Vec::with_capacity(capacity),
    }
}

impl PointsResources {
    /// Copy the particle buffer into the instance buffer; returns the instance count.
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, particles: &ParticleBuffer) -> u32 {
        let n = particles.len().min(self.capacity);
        self.scratch.clear();
        self.scratch.extend(
            particles.positions()[..n]
                .iter()
                .zip(&particles.colors()[..n])
                .map(|(p, c)| ParticleInstance {
                    pos: p.to_array(),
                    color: *c,
                }),
        );
        if n > 0 {
            queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.scratch));
        }
        n as u32
    }
}

/// Half extent, in view units, of a sprite `size` world units across.
///
/// Matches size attenuation of the form `size · (h/2) / depth` pixels.
#[inline]
pub(crate) fn sprite_half_extent(size: f32, fovy_radians: f32) -> f32 {
    0.5 * size * (fovy_radians * 0.5).tan()
}
