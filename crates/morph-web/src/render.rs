use crate::constants::CLEAR_COLOR;
use morph_core::ParticleScene;
use web_sys as web;

mod helpers;
mod lines;
mod points;

use lines::{GuideDraw, LinesResources};
use points::{PointUniforms, PointsResources};

pub(crate) static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub(crate) static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsResources,
    lines: LinesResources,
    // Built on first render from the scene's guide layers
    guide_draws: Vec<GuideDraw>,
    width: u32,
    height: u32,
}

impl GpuState {
    /// Prefer WebGPU; fall back to WebGL2 where the browser lacks it.
    ///
    /// Detection runs before any surface exists, since a canvas that already
    /// handed out a `webgpu` context refuses a `webgl2` one.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        particle_capacity: usize,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        })
        .await;
        Self::with_instance(&instance, canvas, particle_capacity).await
    }

    async fn with_instance(
        instance: &wgpu::Instance,
        canvas: &web::HtmlCanvasElement,
        particle_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU or WebGL2 adapter"))?;
        let info = adapter.get_info();
        log::info!("[gpu] adapter {} ({:?})", info.name, info.backend);

        let required_limits = if info.backend == wgpu::Backend::Gl {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            // Use default limits on web to avoid passing unknown fields to older WebGPU impls
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
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
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let points = points::create_points_resources(&device, format, particle_capacity);
        let lines = lines::create_lines_resources(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            points,
            lines,
            guide_draws: Vec::new(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            log::debug!("[gpu] resize {}x{} -> {}x{}", self.width, self.height, width, height);
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &dyn ParticleScene) -> Result<(), wgpu::SurfaceError> {
        let guides = scene.guides();
        if self.guide_draws.len() != guides.len() {
            self.guide_draws = guides
                .iter()
                .map(|g| self.lines.create_draw(&self.device, g))
                .collect();
        }

        let camera = scene.camera();
        let view_proj = camera.view_proj();
        for (draw, layer) in self.guide_draws.iter().zip(guides) {
            draw.write_uniforms(&self.queue, view_proj, layer);
        }

        let style = scene.point_style();
        let u = PointUniforms {
            proj: camera.projection_matrix().to_cols_array_2d(),
            view_model: (camera.view_matrix() * scene.particle_model()).to_cols_array_2d(),
            tint: [1.0, 1.0, 1.0, style.opacity],
            sprite: [
                points::sprite_half_extent(style.size, camera.fovy_radians),
                0.0,
                0.0,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.points.uniform_buffer, 0, bytemuck::bytes_of(&u));
        let instances = self.points.upload(&self.queue, scene.particles());

        let frame = self.surface.get_current_texture()?;
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
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Guides behind the particles
            rpass.set_pipeline(&self.lines.pipeline);
            for draw in &self.guide_draws {
                rpass.set_bind_group(0, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                rpass.draw(0..draw.vertex_count, 0..1);
            }

            if instances > 0 {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_bind_group(0, &self.points.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.points.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.points.instance_vb.slice(..));
                rpass.draw(0..6, 0..instances);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
