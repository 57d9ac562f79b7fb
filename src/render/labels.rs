use super::helpers;
use super::targets::{DEPTH_FORMAT, HDR_FORMAT};
use crate::core::text_layout::label_world_size;
use crate::core::Label;
use crate::text::LabelBitmap;
use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LabelUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) center_scale: [f32; 4], // xyz world position, w uniform scale
    pub(crate) size_fx: [f32; 4],      // xy quad size, z progress, w direction
    pub(crate) opacity: [f32; 4],
}

impl LabelUniforms {
    pub(crate) fn new(view_proj: Mat4, label: &Label, size: Vec2, progress: f32, direction: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            center_scale: [
                label.position.x,
                label.position.y,
                label.position.z,
                label.scale,
            ],
            size_fx: [size.x, size.y, progress, direction],
            opacity: [label.opacity, 0.0, 0.0, 0.0],
        }
    }
}

pub(crate) struct LabelItem {
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bg: wgpu::BindGroup,
    pub(crate) texture_bg: wgpu::BindGroup,
    pub(crate) size: Vec2,
    _texture: wgpu::Texture,
}

pub(crate) struct LabelResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) items: Vec<LabelItem>,
}

// Straight-alpha color, alpha accumulated as coverage for the composite mask
const LABEL_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent::OVER,
};

pub(crate) fn create_label_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    bitmaps: &[LabelBitmap],
    font_px: f32,
    font_size_world: f32,
) -> LabelResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("label_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::LABEL_WGSL.into()),
    });
    let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("label_uniform_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("label_texture_bgl"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("label_pl"),
        bind_group_layouts: &[&uniform_bgl, &texture_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("label_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_label"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_label"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(LABEL_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let sampler = helpers::linear_sampler(
        device,
        "label_sampler",
        wgpu::AddressMode::ClampToEdge,
        wgpu::AddressMode::ClampToEdge,
    );
    let items = bitmaps
        .iter()
        .enumerate()
        .map(|(i, bmp)| {
            let (texture, view) = helpers::upload_texture(
                device,
                queue,
                "label_tex",
                bmp.width,
                bmp.height,
                wgpu::TextureFormat::Rgba8Unorm,
                4,
                &[bmp.rgba.as_slice()],
            );
            let texture_bg = helpers::texture_bind_group(device, "label_tex_bg", &texture_bgl, &view, &sampler);
            let uniform_buffer = helpers::uniform_buffer::<LabelUniforms>(device, "label_uniforms");
            let uniform_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("label_uniform_bg"),
                layout: &uniform_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            log::debug!("[gpu] label {} {}x{}", i, bmp.width, bmp.height);
            LabelItem {
                uniform_buffer,
                uniform_bg,
                texture_bg,
                size: label_world_size(bmp.width, bmp.height, font_px, font_size_world),
                _texture: texture,
            }
        })
        .collect();

    LabelResources { pipeline, items }
}
