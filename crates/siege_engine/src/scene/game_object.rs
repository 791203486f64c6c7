//! Game objects: named scene-graph nodes carrying transforms and components
//!
//! Objects live in an arena owned by the [`Scene`](super::Scene); parent and
//! child links are plain arena keys, never owning references, so the graph
//! cannot form ownership cycles.

use std::any::TypeId;

use crate::foundation::math::{Transform, Vec3};
use crate::scene::component::Component;
use crate::scene::error::SceneError;

slotmap::new_key_type! {
    /// Arena key identifying a game object within its scene
    pub struct GameObjectId;
}

/// One owned component plus its concrete type key
///
/// The component is wrapped in `Option` so the scene can vacate the slot
/// while a lifecycle hook runs against the rest of the object.
pub(crate) struct ComponentSlot {
    pub(crate) type_id: TypeId,
    pub(crate) component: Option<Box<dyn Component>>,
}

/// A named node in the scene graph with a transform and a set of components
pub struct GameObject {
    name: String,
    id: GameObjectId,
    enabled: bool,
    transform: Transform,
    pub(crate) parent: Option<GameObjectId>,
    pub(crate) children: Vec<GameObjectId>,
    pub(crate) components: Vec<ComponentSlot>,
}

impl GameObject {
    pub(crate) fn new(name: impl Into<String>, id: GameObjectId) -> Self {
        Self {
            name: name.into(),
            id,
            enabled: true,
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    /// The object's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object's arena id
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// Whether this object participates in update and render passes
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the object
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The object's local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Set the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Set the local rotation (XYZ Euler angles, degrees)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
    }

    /// Set the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// The local position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// The local rotation (XYZ Euler angles, degrees)
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// The parent object, if any
    pub fn parent(&self) -> Option<GameObjectId> {
        self.parent
    }

    /// Ids of this object's children
    pub fn children(&self) -> &[GameObjectId] {
        &self.children
    }

    /// Get the component of type `T`, or `None` — never constructs
    pub fn get<T: Component>(&self) -> Option<&T> {
        let type_id = TypeId::of::<T>();
        self.components
            .iter()
            .find(|slot| slot.type_id == type_id)
            .and_then(|slot| slot.component.as_deref())
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Mutable variant of [`get`](Self::get)
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        let type_id = TypeId::of::<T>();
        self.components
            .iter_mut()
            .find(|slot| slot.type_id == type_id)
            .and_then(|slot| slot.component.as_deref_mut())
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Whether the object holds a component of type `T`
    pub fn has<T: Component>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Number of component slots (including vacated ones)
    pub(crate) fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Store a boxed component, asserting at most one per concrete type
    pub(crate) fn add_boxed(
        &mut self,
        type_id: TypeId,
        component: Box<dyn Component>,
    ) -> Result<(), SceneError> {
        if self.components.iter().any(|slot| slot.type_id == type_id) {
            return Err(SceneError::DuplicateComponent {
                component: component.type_name(),
                object: self.name.clone(),
            });
        }
        self.components.push(ComponentSlot {
            type_id,
            component: Some(component),
        });
        Ok(())
    }

    /// Vacate slot `i`, handing out the component for a hook invocation
    pub(crate) fn take_slot(&mut self, i: usize) -> Option<Box<dyn Component>> {
        self.components.get_mut(i).and_then(|slot| slot.component.take())
    }

    /// Restore a component taken with [`take_slot`](Self::take_slot)
    pub(crate) fn restore_slot(&mut self, i: usize, component: Box<dyn Component>) {
        if let Some(slot) = self.components.get_mut(i) {
            slot.component = Some(component);
        }
    }
}
