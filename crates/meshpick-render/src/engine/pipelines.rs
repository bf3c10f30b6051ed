//! Render pipeline creation.

use crate::uniforms::SceneVertex;

/// Depth buffer format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");

/// The fixed set of scene pipelines.
pub(crate) struct Pipelines {
    /// Lit, filled triangles.
    pub lit: wgpu::RenderPipeline,
    /// Unlit triangles, pulled slightly toward the viewer so they win over
    /// coplanar lit geometry.
    pub flat_triangles: wgpu::RenderPipeline,
    /// Unlit line list.
    pub lines: wgpu::RenderPipeline,
    /// Depth-only triangles, pushed slightly away so edges drawn on the
    /// same surface stay visible.
    pub depth_prepass: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let phong = shader_module(device, "phong shader", include_str!("../shaders/phong.wgsl"));
        let flat = shader_module(device, "flat shader", include_str!("../shaders/flat.wgsl"));

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[frame_layout, object_layout],
            push_constant_ranges: &[],
        });

        let color_target = Some(wgpu::ColorTargetState {
            format: color_format,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        });

        let build = |label: &str,
                     module: &wgpu::ShaderModule,
                     topology: wgpu::PrimitiveTopology,
                     with_color: bool,
                     bias: wgpu::DepthBiasState| {
            let targets = [color_target.clone()];
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module,
                    entry_point: Some("vs_main"),
                    buffers: &[SceneVertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: with_color.then(|| wgpu::FragmentState {
                    module,
                    entry_point: Some("fs_main"),
                    targets: &targets,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..wgpu::PrimitiveState::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias,
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        Self {
            lit: build(
                "lit pipeline",
                &phong,
                wgpu::PrimitiveTopology::TriangleList,
                true,
                wgpu::DepthBiasState::default(),
            ),
            flat_triangles: build(
                "flat triangle pipeline",
                &flat,
                wgpu::PrimitiveTopology::TriangleList,
                true,
                wgpu::DepthBiasState {
                    constant: -2,
                    slope_scale: -1.0,
                    clamp: 0.0,
                },
            ),
            lines: build(
                "line pipeline",
                &flat,
                wgpu::PrimitiveTopology::LineList,
                true,
                wgpu::DepthBiasState::default(),
            ),
            depth_prepass: build(
                "depth prepass pipeline",
                &flat,
                wgpu::PrimitiveTopology::TriangleList,
                false,
                wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 1.0,
                    clamp: 0.0,
                },
            ),
        }
    }
}

/// Compiles `source` prefixed with the shared uniform declarations.
fn shader_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(format!("{COMMON_WGSL}\n{source}").into()),
    })
}
