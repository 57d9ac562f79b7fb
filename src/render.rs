use crate::constants::{
    BLOB_DETAIL, BLOB_RADIUS, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, LABEL_FONT_PX,
    TONE_MAPPING_EXPOSURE,
};
use crate::assets::LoadedAssets;
use crate::core::geometry::icosphere;
use crate::core::{Camera, SceneState};
use crate::text::LabelBitmap;
use glam::Mat4;
use web_sys as web;

mod blob;
mod helpers;
mod labels;
mod post;
mod targets;
use blob::{create_blob_resources, BlobResources, BlobUniforms};
use labels::{create_label_resources, LabelResources, LabelUniforms};
use post::PostResources;
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // Swapchain view format; always the sRGB variant so the composite writes linear values
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,
    blob: BlobResources,
    labels: LabelResources,
    post: PostResources,
    camera: Camera,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        assets: &LoadedAssets,
        label_bitmaps: &[LabelBitmap],
        font_size_world: f32,
    ) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
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
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let view_format = format.add_srgb_suffix();
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
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {:?} (view {:?}) {}x{}",
            format,
            view_format,
            width,
            height
        );

        let targets = RenderTargets::new(&device, width, height);

        let mesh = icosphere(BLOB_RADIUS, BLOB_DETAIL);
        log::info!(
            "[gpu] blob mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        let blob = create_blob_resources(
            &device,
            &queue,
            &mesh,
            &assets.color_maps,
            &assets.environment,
        );
        let labels = create_label_resources(
            &device,
            &queue,
            label_bitmaps,
            LABEL_FONT_PX,
            font_size_world,
        );
        let post = post::create_post_resources(&device, &targets.hdr_view, view_format);
        post::write_post_uniforms(&queue, &post.uniform_buffer, TONE_MAPPING_EXPOSURE);

        let camera = Camera::looking_at_origin(
            CAMERA_Z,
            CAMERA_FOV_DEG,
            width as f32 / height as f32,
            CAMERA_NEAR,
            CAMERA_FAR,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            blob,
            labels,
            post,
            camera,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_viewport(width, height);

            // Recreate offscreen render targets and the composite input
            self.targets.recreate(&self.device, width, height);
            self.post.rebind(&self.device, &self.targets.hdr_view);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Reconfigure the surface after it was lost or went out of date.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let view_proj = self.camera.view_projection();

        let material = &scene.material;
        let model = Mat4::from_rotation_y(scene.blob_rotation_y);
        let blob_u = BlobUniforms::new(
            view_proj,
            model,
            self.camera.eye.to_array(),
            scene.elapsed,
            material,
            self.blob.env_max_lod,
        );
        self.queue
            .write_buffer(&self.blob.uniform_buffer, 0, bytemuck::bytes_of(&blob_u));
        for (item, label) in self.labels.items.iter().zip(&scene.labels) {
            let u = LabelUniforms::new(
                view_proj,
                label,
                item.size,
                scene.text_progress,
                scene.text_direction,
            );
            self.queue
                .write_buffer(&item.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            // Alpha 0 marks background so the composite skips tone mapping there
            let bg = scene.background;
            let clear = wgpu::Color {
                r: bg.r as f64,
                g: bg.g as f64,
                b: bg.b as f64,
                a: 0.0,
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.blob.uniform_bg, &[]);
            rpass.set_bind_group(1, self.blob.map_bind_group(material.map), &[]);
            rpass.set_bind_group(2, &self.blob.env_bg, &[]);
            rpass.set_vertex_buffer(0, self.blob.vertex_buffer.slice(..));
            if material.wireframe {
                rpass.set_pipeline(&self.blob.wire_pipeline);
                rpass.set_index_buffer(self.blob.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.blob.edge_count, 0, 0..1);
            } else {
                rpass.set_pipeline(&self.blob.pipeline);
                rpass.set_index_buffer(self.blob.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.blob.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.labels.pipeline);
            for (item, label) in self.labels.items.iter().zip(&scene.labels) {
                if label.scale <= 0.0 || label.opacity <= 0.0 {
                    continue;
                }
                rpass.set_bind_group(0, &item.uniform_bg, &[]);
                rpass.set_bind_group(1, &item.texture_bg, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        post::blit(
            &mut encoder,
            "composite",
            &view,
            wgpu::Color::BLACK,
            &self.post.composite_pipeline,
            &self.post.bind_group,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
