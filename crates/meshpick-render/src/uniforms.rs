//! GPU-side data layouts shared with the WGSL shaders.

use glam::{Mat4, Vec4};
use meshpick_core::{FrameTransforms, LightOptions, Options};

/// A vertex of any scene geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl SceneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout for pipelines.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One point light. Matches WGSL `Light`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl From<&LightOptions> for LightUniform {
    fn from(light: &LightOptions) -> Self {
        let [x, y, z] = light.position;
        Self {
            position: [x, y, z, 1.0],
            ambient: light.ambient,
            diffuse: light.diffuse,
            specular: light.specular,
        }
    }
}

/// Per-frame uniforms (group 0). Matches WGSL `Frame`, 288 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub global_ambient: [f32; 4],
    pub lights: [LightUniform; 2],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    /// Specular exponent in `x`.
    pub shininess: [f32; 4],
}

impl FrameUniforms {
    /// Builds the frame uniforms from the frame's transforms and the
    /// current scene options.
    pub fn new(transforms: &FrameTransforms, options: &Options) -> Self {
        let camera = &options.camera;
        let view_proj = transforms.projection(camera.near, camera.render_far) * transforms.view;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: transforms.eye.extend(1.0).to_array(),
            global_ambient: options.scene.global_ambient,
            lights: [
                LightUniform::from(&options.lights[0]),
                LightUniform::from(&options.lights[1]),
            ],
            material_ambient: options.material.ambient,
            material_diffuse: options.material.diffuse,
            material_specular: options.material.specular,
            shininess: [options.material.shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// Per-draw uniforms (group 1, dynamic offset). Matches WGSL `Object`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, color: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshpick_core::OrbitCamera;

    #[test]
    fn test_layout_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<SceneVertex>(), 24);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 288);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 80);
    }

    #[test]
    fn test_frame_uniforms_use_render_projection() {
        let options = Options::default();
        let camera = OrbitCamera::new(&options.camera);
        let transforms = FrameTransforms::capture(&camera, &options.camera);
        let uniforms = FrameUniforms::new(&transforms, &options);

        let expected = camera.projection_matrix(options.camera.near, options.camera.render_far)
            * camera.view_matrix();
        assert_eq!(Mat4::from_cols_array_2d(&uniforms.view_proj), expected);
        assert_eq!(uniforms.lights[1].position, [-2.5, -0.65, 1.5, 1.0]);
        assert_eq!(uniforms.shininess[0], options.material.shininess);
    }
}
