//! Scene and component error types

use thiserror::Error;

/// Errors raised by the scene graph, component registry, and scene IO
#[derive(Debug, Error)]
pub enum SceneError {
    /// A component depends on a sibling component that is not present
    #[error("missing required component {component} on object '{object}'")]
    MissingComponent {
        /// Type name of the absent component
        component: &'static str,
        /// Name of the object that was inspected
        object: String,
    },

    /// A serialized component references a type name that was never registered
    #[error("unknown component type '{0}'")]
    UnknownComponentType(String),

    /// A scene file is missing a required field or holds an invalid value
    #[error("malformed scene file: missing or invalid field '{field}'")]
    MalformedSceneFile {
        /// The offending field
        field: String,
    },

    /// An asset could not be loaded; callers receive a placeholder instead
    #[error("resource load failure: {0}")]
    ResourceLoadFailure(String),

    /// An object may hold at most one component of a given concrete type
    #[error("object '{object}' already has a {component} component")]
    DuplicateComponent {
        /// Type name of the rejected component
        component: &'static str,
        /// Name of the object
        object: String,
    },

    /// Reparenting would make an object its own ancestor
    #[error("reparenting would create a cycle in the scene graph")]
    HierarchyCycle,

    /// The referenced game object no longer exists
    #[error("game object no longer exists")]
    NoSuchObject,

    /// The lights list is capped at `Scene::MAX_LIGHTS`
    #[error("light limit reached (max {max})")]
    TooManyLights {
        /// The configured cap
        max: usize,
    },

    /// Underlying IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
