//! Name-keyed asset stores with manifest save/load

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::types::{Asset, Material, MeshResource, ShaderProgram, Texture2D};
use crate::scene::SceneError;

/// Serialized form of every store, written as one JSON document
#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    meshes: Vec<MeshResource>,
    textures: Vec<Texture2D>,
    shaders: Vec<ShaderProgram>,
    materials: Vec<Material>,
}

/// Owns every loaded asset, keyed by name within each type
///
/// Assets are handed out as `Arc` handles; dropping the manager does not
/// invalidate handles already held by gameplay code.
#[derive(Default)]
pub struct ResourceManager {
    meshes: HashMap<String, Arc<MeshResource>>,
    textures: HashMap<String, Arc<Texture2D>>,
    shaders: HashMap<String, Arc<ShaderProgram>>,
    materials: HashMap<String, Arc<Material>>,
}

/// Store selection per asset type
pub trait AssetStore<T: Asset> {
    /// The map holding assets of type `T`
    fn store(&self) -> &HashMap<String, Arc<T>>;

    /// Mutable access to the map holding assets of type `T`
    fn store_mut(&mut self) -> &mut HashMap<String, Arc<T>>;
}

macro_rules! impl_asset_store {
    ($ty:ty, $field:ident) => {
        impl AssetStore<$ty> for ResourceManager {
            fn store(&self) -> &HashMap<String, Arc<$ty>> {
                &self.$field
            }

            fn store_mut(&mut self) -> &mut HashMap<String, Arc<$ty>> {
                &mut self.$field
            }
        }
    };
}

impl_asset_store!(MeshResource, meshes);
impl_asset_store!(Texture2D, textures);
impl_asset_store!(ShaderProgram, shaders);
impl_asset_store!(Material, materials);

impl ResourceManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an asset, replacing any previous asset with the same name
    pub fn create<T: Asset>(&mut self, asset: T) -> Arc<T>
    where
        Self: AssetStore<T>,
    {
        let handle = Arc::new(asset);
        self.store_mut()
            .insert(handle.name().to_string(), Arc::clone(&handle));
        handle
    }

    /// Look up an asset by name
    pub fn get<T: Asset>(&self, name: &str) -> Option<Arc<T>>
    where
        Self: AssetStore<T>,
    {
        self.store().get(name).cloned()
    }

    /// Look up an asset, substituting (and caching) a placeholder on a miss
    ///
    /// The miss is logged as a resource load failure rather than propagated,
    /// so one missing file cannot take the whole scene down.
    pub fn get_or_placeholder<T: Asset>(&mut self, name: &str) -> Arc<T>
    where
        Self: AssetStore<T>,
    {
        if let Some(handle) = self.store().get(name) {
            return Arc::clone(handle);
        }
        log::error!(
            "{}",
            SceneError::ResourceLoadFailure(format!("{} '{}'", T::TYPE_NAME, name))
        );
        self.create(T::placeholder(name))
    }

    /// Visit every stored asset of type `T`
    pub fn each<T: Asset>(&self, mut visitor: impl FnMut(&Arc<T>))
    where
        Self: AssetStore<T>,
    {
        for handle in self.store().values() {
            visitor(handle);
        }
    }

    /// Number of stored assets of type `T`
    pub fn count<T: Asset>(&self) -> usize
    where
        Self: AssetStore<T>,
    {
        self.store().len()
    }

    /// Write every store to a JSON manifest file
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        fn sorted<T: Asset>(store: &HashMap<String, Arc<T>>) -> Vec<T> {
            let mut assets: Vec<T> = store.values().map(|a| (**a).clone()).collect();
            assets.sort_by(|a, b| a.name().cmp(b.name()));
            assets
        }

        let manifest = Manifest {
            meshes: sorted(&self.meshes),
            textures: sorted(&self.textures),
            shaders: sorted(&self.shaders),
            materials: sorted(&self.materials),
        };
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(&manifest)?)?;
        log::info!("Saved asset manifest to {}", path.as_ref().display());
        Ok(())
    }

    /// Replace every store with the contents of a JSON manifest file
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SceneError::ResourceLoadFailure(format!("{}: {e}", path.as_ref().display())))?;
        let manifest: Manifest = serde_json::from_str(&contents).map_err(|_| {
            SceneError::MalformedSceneFile {
                field: "manifest".to_string(),
            }
        })?;

        self.meshes.clear();
        self.textures.clear();
        self.shaders.clear();
        self.materials.clear();
        for mesh in manifest.meshes {
            self.create(mesh);
        }
        for texture in manifest.textures {
            self.create(texture);
        }
        for shader in manifest.shaders {
            self.create(shader);
        }
        for material in manifest.materials {
            self.create(material);
        }
        log::info!(
            "Loaded asset manifest from {} ({} meshes, {} materials)",
            path.as_ref().display(),
            self.meshes.len(),
            self.materials.len()
        );
        Ok(())
    }
}
