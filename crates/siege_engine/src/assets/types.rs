//! Concrete asset types managed by the [`ResourceManager`](super::ResourceManager)

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// An asset storable in the resource manager
pub trait Asset: Clone + Send + Sync + 'static {
    /// Stable type tag used in manifests
    const TYPE_NAME: &'static str;

    /// The asset's name, unique within its type
    fn name(&self) -> &str;

    /// Stand-in returned when a requested asset is missing
    fn placeholder(name: &str) -> Self;
}

/// Geometry referenced by renderers through its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshResource {
    /// Unique mesh name
    pub name: String,
    /// Source file the mesh is loaded from
    pub path: String,
}

impl MeshResource {
    /// Describe a mesh backed by a source file
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Asset for MeshResource {
    const TYPE_NAME: &'static str = "MeshResource";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name, "builtin://unit_cube")
    }
}

/// A 2D texture referenced by materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture2D {
    /// Unique texture name
    pub name: String,
    /// Source file the texture is loaded from
    pub path: String,
}

impl Texture2D {
    /// Describe a texture backed by a source file
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Asset for Texture2D {
    const TYPE_NAME: &'static str = "Texture2D";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name, "builtin://checkerboard")
    }
}

/// A compiled shader pair referenced by materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderProgram {
    /// Unique program name
    pub name: String,
    /// Vertex stage source file
    pub vertex_path: String,
    /// Fragment stage source file
    pub fragment_path: String,
}

impl ShaderProgram {
    /// Describe a program from its stage sources
    pub fn new(
        name: impl Into<String>,
        vertex_path: impl Into<String>,
        fragment_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_path: vertex_path.into(),
            fragment_path: fragment_path.into(),
        }
    }
}

impl Asset for ShaderProgram {
    const TYPE_NAME: &'static str = "ShaderProgram";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name, "builtin://flat.vert", "builtin://flat.frag")
    }
}

/// Surface description binding a shader, a texture, and a base color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique material name
    pub name: String,
    /// Name of the shader program to bind
    pub shader: String,
    /// Name of the texture to bind, empty for untextured
    pub texture: String,
    /// RGB base color multiplier
    pub base_color: Vec3,
}

impl Material {
    /// Describe a material over the given shader
    pub fn new(name: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            texture: String::new(),
            base_color: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Builder-style texture assignment
    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    /// Builder-style base color assignment
    #[must_use]
    pub fn with_base_color(mut self, color: Vec3) -> Self {
        self.base_color = color;
        self
    }
}

impl Asset for Material {
    const TYPE_NAME: &'static str = "Material";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        // Magenta stands out in any scene
        Self::new(name, "flat").with_base_color(Vec3::new(1.0, 0.0, 1.0))
    }
}
