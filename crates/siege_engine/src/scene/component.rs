//! Component trait and the context passed to lifecycle hooks

use std::any::Any;

use crate::foundation::math::Transform;
use crate::scene::game_object::{GameObject, GameObjectId};

/// A polymorphic behavior/data unit attached to exactly one game object
///
/// Hooks default to no-ops; components implement only the passes they care
/// about. Serialization goes through [`to_json`](Component::to_json) and the
/// factory registered in [`ComponentTypes`](super::ComponentTypes), tagged
/// by the stable [`type_name`](Component::type_name).
pub trait Component: Any {
    /// Stable type name, identical to the name used at registration
    fn type_name(&self) -> &'static str;

    /// Downcast seam
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast seam
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Whether this component should receive update passes
    ///
    /// Components that discover a missing dependency during
    /// [`awake`](Component::awake) disable themselves by returning false.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Called once when the scene wakes (or when added to an awake scene)
    fn awake(&mut self, _ctx: &mut ComponentCtx<'_>) {}

    /// Called every frame while the scene is playing
    fn update(&mut self, _ctx: &mut ComponentCtx<'_>, _dt: f32) {}

    /// Called when a trigger volume involving this object fires an enter event
    fn on_trigger_enter(&mut self, _ctx: &mut ComponentCtx<'_>, _other: GameObjectId) {}

    /// Serialize this component's fields to a JSON value
    fn to_json(&self) -> Result<serde_json::Value, crate::scene::SceneError>;
}

/// Deferred scene-level operations queued from component hooks
///
/// Hooks only see their own object; anything touching the rest of the graph
/// is queued here and applied by the scene once the pass finishes.
#[derive(Debug, Default)]
pub struct SceneCommands {
    pub(crate) commands: Vec<SceneCommand>,
}

#[derive(Debug)]
pub(crate) enum SceneCommand {
    DestroyObject(GameObjectId),
    SetObjectEnabled(GameObjectId, bool),
}

impl SceneCommands {
    /// Queue destruction of an object (applied after the current pass)
    pub fn destroy_object(&mut self, id: GameObjectId) {
        self.commands.push(SceneCommand::DestroyObject(id));
    }

    /// Queue enabling/disabling an object
    pub fn set_object_enabled(&mut self, id: GameObjectId, enabled: bool) {
        self.commands.push(SceneCommand::SetObjectEnabled(id, enabled));
    }
}

/// Per-hook view of the owning game object
///
/// While a hook runs, its own slot on the object is vacated, so sibling
/// lookups through the context can never alias the running component.
pub struct ComponentCtx<'a> {
    object_id: GameObjectId,
    object: &'a mut GameObject,
    commands: &'a mut SceneCommands,
}

impl<'a> ComponentCtx<'a> {
    pub(crate) fn new(
        object_id: GameObjectId,
        object: &'a mut GameObject,
        commands: &'a mut SceneCommands,
    ) -> Self {
        Self {
            object_id,
            object,
            commands,
        }
    }

    /// Id of the owning object
    pub fn object_id(&self) -> GameObjectId {
        self.object_id
    }

    /// Name of the owning object
    pub fn object_name(&self) -> &str {
        self.object.name()
    }

    /// The owning object's local transform
    pub fn transform(&self) -> &Transform {
        self.object.transform()
    }

    /// Mutable access to the owning object's local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        self.object.transform_mut()
    }

    /// Look up a sibling component of type `T`
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.object.get::<T>()
    }

    /// Mutable sibling lookup
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.object.get_mut::<T>()
    }

    /// Queue for deferred scene-level operations
    pub fn commands(&mut self) -> &mut SceneCommands {
        self.commands
    }
}
