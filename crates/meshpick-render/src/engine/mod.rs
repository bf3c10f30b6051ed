//! The main rendering engine.

mod pipelines;
mod rendering;

use std::num::NonZeroU64;
use std::sync::Arc;

use meshpick_core::{uv_sphere, Mesh};

use crate::buffer::{align_to, create_uniform_buffer};
use crate::error::{RenderError, RenderResult};
use crate::geometry::{axis_vertices, sphere_vertices, GpuGeometry, GpuMesh};
use crate::uniforms::{FrameUniforms, ObjectUniforms};

pub use pipelines::DEPTH_FORMAT;
pub use rendering::SceneView;

use pipelines::Pipelines;
use rendering::ObjectSlot;

/// A surface texture being drawn, with the encoder recording into it.
pub struct Frame {
    output: wgpu::SurfaceTexture,
    /// View of the surface texture.
    pub view: wgpu::TextureView,
    /// Encoder for this frame's passes.
    pub encoder: wgpu::CommandEncoder,
}

/// The rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    /// Surface configuration.
    pub surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipelines: Pipelines,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    /// Distance in bytes between object uniform slots.
    object_stride: u64,
    mesh: Option<GpuMesh>,
    sphere: GpuGeometry,
    axes: GpuGeometry,
    /// Current surface width.
    pub width: u32,
    /// Current surface height.
    pub height: u32,
}

impl RenderEngine {
    /// Creates an engine drawing into `window`.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;
        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("meshpick device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // Colors are authored in display space.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let depth_view = Self::create_depth_view(&device, width, height);

        let frame_size = std::mem::size_of::<FrameUniforms>() as u64;
        let object_size = std::mem::size_of::<ObjectUniforms>() as u64;
        let object_stride = align_to(
            object_size,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame bind group layout"),
            entries: &[uniform_entry(frame_size, false)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object bind group layout"),
            entries: &[uniform_entry(object_size, true)],
        });

        let frame_buffer = create_uniform_buffer(&device, frame_size, Some("frame uniforms"));
        let object_buffer = create_uniform_buffer(
            &device,
            object_stride * ObjectSlot::COUNT,
            Some("object uniforms"),
        );

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object bind group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: NonZeroU64::new(object_size),
                }),
            }],
        });

        let pipelines = Pipelines::new(&device, surface_format, &frame_layout, &object_layout);

        let sphere_mesh = uv_sphere(1.0, 16, 12);
        let sphere = GpuGeometry::new(
            &device,
            &sphere_vertices(&sphere_mesh),
            &sphere_mesh.indices,
            "marker sphere",
        );
        let axes = GpuGeometry::new(&device, &axis_vertices(), &[0, 1, 2, 3, 4, 5], "axes");

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            pipelines,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_stride,
            mesh: None,
            sphere,
            axes,
            width,
            height,
        })
    }

    /// Uploads the mesh to draw, replacing any previous one.
    pub fn upload_mesh(&mut self, mesh: &Mesh) {
        self.mesh = Some(GpuMesh::new(&self.device, mesh));
    }

    /// The surface texture format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Resizes the render target.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, width, height);
    }

    /// Acquires the next surface texture.
    ///
    /// Returns `Ok(None)` when this frame should be skipped; a lost or
    /// outdated surface is reconfigured first.
    pub fn begin_frame(&mut self) -> RenderResult<Option<Frame>> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.width, self.height);
                return Ok(None);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                return Err(RenderError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return Ok(None);
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return Ok(None);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });
        Ok(Some(Frame {
            output,
            view,
            encoder,
        }))
    }

    /// Submits the frame's commands and presents it.
    pub fn finish_frame(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

fn uniform_entry(size: u64, dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}
