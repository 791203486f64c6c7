//! Asset management: typed, name-keyed stores plus manifest IO

pub mod resource_manager;
pub mod types;

pub use resource_manager::{AssetStore, ResourceManager};
pub use types::{Asset, Material, MeshResource, ShaderProgram, Texture2D};
