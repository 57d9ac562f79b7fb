use super::helpers;
use super::targets::{DEPTH_FORMAT, HDR_FORMAT};
use crate::core::geometry::{BlobVertex, MeshData};
use crate::core::texture::{ColorMap, EnvironmentMap};
use crate::core::BlobMaterial;
use fnv::FnvHashMap;
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BlobUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) camera_time: [f32; 4], // xyz eye, w elapsed seconds
    pub(crate) position_frequency: f32,
    pub(crate) position_strength: f32,
    pub(crate) time_frequency: f32,
    pub(crate) small_wave_position_frequency: f32,
    pub(crate) small_wave_position_strength: f32,
    pub(crate) small_wave_time_frequency: f32,
    pub(crate) roughness: f32,
    pub(crate) metalness: f32,
    pub(crate) env_map_intensity: f32,
    pub(crate) clearcoat: f32,
    pub(crate) clearcoat_roughness: f32,
    pub(crate) transmission: f32,
    pub(crate) flat_shading: f32,
    pub(crate) env_max_lod: f32,
    pub(crate) _pad: [f32; 2],
}

impl BlobUniforms {
    pub(crate) fn new(
        view_proj: Mat4,
        model: Mat4,
        eye: [f32; 3],
        elapsed: f32,
        m: &BlobMaterial,
        env_max_lod: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_time: [eye[0], eye[1], eye[2], elapsed],
            position_frequency: m.position_frequency,
            position_strength: m.position_strength,
            time_frequency: m.time_frequency,
            small_wave_position_frequency: m.small_wave_position_frequency,
            small_wave_position_strength: m.small_wave_position_strength,
            small_wave_time_frequency: m.small_wave_time_frequency,
            roughness: m.roughness,
            metalness: m.metalness,
            env_map_intensity: m.env_map_intensity,
            clearcoat: m.clearcoat,
            clearcoat_roughness: m.clearcoat_roughness,
            transmission: m.transmission,
            flat_shading: if m.flat_shading { 1.0 } else { 0.0 },
            env_max_lod,
            _pad: [0.0; 2],
        }
    }
}

pub(crate) struct BlobResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) wire_pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) edge_buffer: wgpu::Buffer,
    pub(crate) edge_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bg: wgpu::BindGroup,
    /// Gradient bind groups keyed by preset map name.
    pub(crate) maps: FnvHashMap<String, wgpu::BindGroup>,
    pub(crate) fallback_map: wgpu::BindGroup,
    pub(crate) env_bg: wgpu::BindGroup,
    pub(crate) env_max_lod: f32,
    // Held so the views above stay backed on every backend
    _textures: Vec<wgpu::Texture>,
}

impl BlobResources {
    pub(crate) fn map_bind_group(&self, name: &str) -> &wgpu::BindGroup {
        self.maps.get(name).unwrap_or(&self.fallback_map)
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
    3 => Float32x3
];

pub(crate) fn create_blob_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    mesh: &MeshData,
    color_maps: &[ColorMap],
    env: &EnvironmentMap,
) -> BlobResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("blob_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::BLOB_WGSL.into()),
    });
    let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("blob_uniform_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("blob_texture_bgl"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("blob_pl"),
        bind_group_layouts: &[&uniform_bgl, &texture_bgl, &texture_bgl],
        push_constant_ranges: &[],
    });

    let make_pipeline = |label: &str, topology: wgpu::PrimitiveTopology, cull: Option<wgpu::Face>| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_blob"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<BlobVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology,
                cull_mode: cull,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_blob"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };
    let pipeline = make_pipeline(
        "blob_pipeline",
        wgpu::PrimitiveTopology::TriangleList,
        Some(wgpu::Face::Back),
    );
    let wire_pipeline = make_pipeline("blob_wire_pipeline", wgpu::PrimitiveTopology::LineList, None);

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("blob_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("blob_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("blob_edges"),
        contents: bytemuck::cast_slice(&mesh.edges),
        usage: wgpu::BufferUsages::INDEX,
    });

    let uniform_buffer = helpers::uniform_buffer::<BlobUniforms>(device, "blob_uniforms");
    let uniform_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("blob_uniform_bg"),
        layout: &uniform_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    // Gradients wrap horizontally across the UV seam
    let map_sampler = helpers::linear_sampler(
        device,
        "map_sampler",
        wgpu::AddressMode::Repeat,
        wgpu::AddressMode::ClampToEdge,
    );
    let mut textures = Vec::with_capacity(color_maps.len() + 2);
    let mut maps = FnvHashMap::default();
    for map in color_maps {
        let (tex, view) = helpers::upload_texture(
            device,
            queue,
            &map.name,
            map.width,
            map.height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            4,
            &[map.rgba.as_slice()],
        );
        let bg = helpers::texture_bind_group(device, &map.name, &texture_bgl, &view, &map_sampler);
        maps.insert(map.name.clone(), bg);
        textures.push(tex);
    }
    let (white_tex, white_view) = helpers::upload_texture(
        device,
        queue,
        "map_fallback",
        1,
        1,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        4,
        &[&[255u8, 255, 255, 255][..]],
    );
    let fallback_map =
        helpers::texture_bind_group(device, "map_fallback", &texture_bgl, &white_view, &map_sampler);
    textures.push(white_tex);

    let env_levels: Vec<&[u8]> = env
        .mips
        .iter()
        .map(|m| bytemuck::cast_slice(&m.texels))
        .collect();
    let (env_tex, env_view) = helpers::upload_texture(
        device,
        queue,
        "environment",
        env.width(),
        env.height(),
        wgpu::TextureFormat::Rgba16Float,
        8,
        &env_levels,
    );
    let env_sampler = helpers::linear_sampler(
        device,
        "env_sampler",
        wgpu::AddressMode::Repeat,
        wgpu::AddressMode::ClampToEdge,
    );
    let env_bg = helpers::texture_bind_group(device, "env_bg", &texture_bgl, &env_view, &env_sampler);
    textures.push(env_tex);

    BlobResources {
        pipeline,
        wire_pipeline,
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        edge_buffer,
        edge_count: mesh.edges.len() as u32,
        uniform_buffer,
        uniform_bg,
        maps,
        fallback_map,
        env_bg,
        env_max_lod: env.mip_count().saturating_sub(1) as f32,
        _textures: textures,
    }
}
