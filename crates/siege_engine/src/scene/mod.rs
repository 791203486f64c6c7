//! Scene graph: game objects, components, lights, and whole-graph JSON IO
//!
//! A [`Scene`] owns every game object in an arena; parent/child links are
//! arena keys. Component lifecycle passes (`awake`, `update`, trigger
//! dispatch) vacate one component slot at a time so hooks get mutable
//! access to the rest of their object without aliasing.

pub mod component;
pub mod components;
pub mod error;
pub mod game_object;
pub mod registry;

pub use component::{Component, ComponentCtx, SceneCommands};
pub use error::SceneError;
pub use game_object::{GameObject, GameObjectId};
pub use registry::{ComponentFromJson, ComponentTypes};

use std::any::TypeId;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::{BodyKind, PhysicsWorld};
use crate::render::DrawItem;
use crate::scene::component::SceneCommand;
use crate::scene::components::{Camera, RenderComponent, RigidBody, TriggerVolume};

/// A point light in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// World-space position
    pub position: Vec3,
    /// RGB color
    pub color: Vec3,
    /// Attenuation range
    pub range: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            range: 100.0,
        }
    }
}

/// Lifecycle state of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Constructed, objects may be added, no hooks have run
    Created,
    /// Loaded from serialized form, awaiting its awake pass
    AwakePending,
    /// Gameplay updates run
    Playing,
    /// Edit mode: awake has run but updates are suspended
    Paused,
    /// Torn down; no further passes run
    Destroyed,
}

/// The owning container for a full object graph, lights, and camera
pub struct Scene {
    name: String,
    objects: SlotMap<GameObjectId, GameObject>,
    roots: Vec<GameObjectId>,
    lights: Vec<Light>,
    main_camera: Option<GameObjectId>,
    state: SceneState,
    types: Arc<ComponentTypes>,
    live_index: HashMap<TypeId, Vec<GameObjectId>>,
    physics: PhysicsWorld,
}

impl Scene {
    /// Upper bound on the lights list, matching the shader-side array size
    pub const MAX_LIGHTS: usize = 8;

    /// Create an empty scene sharing the given component registrations
    pub fn new(name: impl Into<String>, types: Arc<ComponentTypes>) -> Self {
        Self {
            name: name.into(),
            objects: SlotMap::with_key(),
            roots: Vec::new(),
            lights: Vec::new(),
            main_camera: None,
            state: SceneState::Created,
            types,
            live_index: HashMap::new(),
            physics: PhysicsWorld::new(),
        }
    }

    /// The scene's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Whether gameplay updates currently run
    pub fn is_playing(&self) -> bool {
        self.state == SceneState::Playing
    }

    /// Number of live game objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ------------------------------------------------------------------
    // Object graph
    // ------------------------------------------------------------------

    /// Create a new root-level game object
    pub fn create_game_object(&mut self, name: impl Into<String>) -> GameObjectId {
        let name = name.into();
        let id = self
            .objects
            .insert_with_key(|key| GameObject::new(name, key));
        self.roots.push(id);
        id
    }

    /// Borrow an object by id
    pub fn object(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Mutably borrow an object by id
    pub fn object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Find the first object with the given name
    pub fn find_object_by_name(&self, name: &str) -> Option<GameObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name() == name)
            .map(|(id, _)| id)
    }

    /// Ids of root-level objects
    pub fn roots(&self) -> &[GameObjectId] {
        &self.roots
    }

    /// Make `child` a child of `parent`, rejecting ancestor cycles
    ///
    /// Detaches `child` from its current parent (or the root list) first.
    pub fn add_child(&mut self, parent: GameObjectId, child: GameObjectId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::HierarchyCycle);
        }
        if !self.objects.contains_key(parent) || !self.objects.contains_key(child) {
            return Err(SceneError::NoSuchObject);
        }

        // Walk up from the new parent; finding `child` there means a cycle
        let mut cursor = self.objects[parent].parent;
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SceneError::HierarchyCycle);
            }
            cursor = self.objects[ancestor].parent;
        }

        match self.objects[child].parent {
            Some(old_parent) => {
                if let Some(object) = self.objects.get_mut(old_parent) {
                    object.children.retain(|&c| c != child);
                }
            }
            None => self.roots.retain(|&r| r != child),
        }

        self.objects[child].parent = Some(parent);
        self.objects[parent].children.push(child);
        Ok(())
    }

    /// World matrix for an object: local transform composed up the parent chain
    ///
    /// Computed on demand, so it reflects any parent mutation made earlier
    /// in the same frame.
    pub fn world_transform(&self, id: GameObjectId) -> Option<Mat4> {
        let object = self.objects.get(id)?;
        let mut matrix = object.transform().to_matrix();
        let mut cursor = object.parent;
        while let Some(parent_id) = cursor {
            let parent = self.objects.get(parent_id)?;
            matrix = parent.transform().to_matrix() * matrix;
            cursor = parent.parent;
        }
        Some(matrix)
    }

    /// Destroy an object, its components, and all of its descendants
    pub fn destroy_game_object(&mut self, id: GameObjectId) {
        let Some(object) = self.objects.get(id) else {
            return;
        };
        let children = object.children.clone();
        for child in children {
            self.destroy_game_object(child);
        }

        if let Some(object) = self.objects.remove(id) {
            // Components go first: deregister from the live index and physics
            for slot in &object.components {
                if let Some(ids) = self.live_index.get_mut(&slot.type_id) {
                    ids.retain(|&oid| oid != id);
                }
            }
            self.physics.remove_body(id);

            match object.parent {
                Some(parent) => {
                    if let Some(parent) = self.objects.get_mut(parent) {
                        parent.children.retain(|&c| c != id);
                    }
                }
                None => self.roots.retain(|&r| r != id),
            }

            if self.main_camera == Some(id) {
                self.main_camera = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach a component to an object, asserting at most one per type
    ///
    /// If the scene has already woken, the component's awake hook runs
    /// immediately.
    pub fn add_component<T: Component>(
        &mut self,
        id: GameObjectId,
        component: T,
    ) -> Result<(), SceneError> {
        self.add_boxed_component(id, Box::new(component))?;
        if matches!(self.state, SceneState::Playing | SceneState::Paused) {
            let slot = self.objects[id].component_count() - 1;
            let mut commands = SceneCommands::default();
            self.run_slot(id, slot, &mut commands, |component, ctx| component.awake(ctx));
            self.apply_commands(commands);
        }
        Ok(())
    }

    fn add_boxed_component(
        &mut self,
        id: GameObjectId,
        component: Box<dyn Component>,
    ) -> Result<(), SceneError> {
        let type_id = component.as_any().type_id();
        let object = self.objects.get_mut(id).ok_or(SceneError::NoSuchObject)?;
        object.add_boxed(type_id, component)?;
        self.live_index.entry(type_id).or_default().push(id);
        Ok(())
    }

    /// Borrow an object's component of type `T`
    pub fn get_component<T: Component>(&self, id: GameObjectId) -> Option<&T> {
        self.objects.get(id).and_then(GameObject::get::<T>)
    }

    /// Mutably borrow an object's component of type `T`
    pub fn get_component_mut<T: Component>(&mut self, id: GameObjectId) -> Option<&mut T> {
        self.objects.get_mut(id).and_then(GameObject::get_mut::<T>)
    }

    /// Visit every live component of exactly type `T`
    ///
    /// Order is the order instances were registered, stable for a given
    /// run; destroyed instances are never visited.
    pub fn each<T: Component>(&self, mut visitor: impl FnMut(GameObjectId, &T)) {
        if let Some(ids) = self.live_index.get(&TypeId::of::<T>()) {
            for &id in ids {
                if let Some(component) = self.objects.get(id).and_then(GameObject::get::<T>) {
                    visitor(id, component);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle passes
    // ------------------------------------------------------------------

    /// Designate the scene's main camera; the object must carry a [`Camera`]
    pub fn set_main_camera(&mut self, id: GameObjectId) -> Result<(), SceneError> {
        let object = self.objects.get(id).ok_or(SceneError::NoSuchObject)?;
        if !object.has::<Camera>() {
            return Err(SceneError::MissingComponent {
                component: Camera::TYPE_NAME,
                object: object.name().to_string(),
            });
        }
        self.main_camera = Some(id);
        Ok(())
    }

    /// The designated main camera object, if any
    pub fn main_camera(&self) -> Option<GameObjectId> {
        self.main_camera
    }

    /// Run the awake hook on every component, once, in a single pass
    ///
    /// Safe to call again after a full reload; leaves the scene paused
    /// (edit mode) unless it was already playing.
    pub fn awake(&mut self) {
        log::info!(
            "Waking scene '{}' ({} objects, {} lights)",
            self.name,
            self.objects.len(),
            self.lights.len()
        );
        self.for_each_component(false, |component, ctx| component.awake(ctx));
        if self.state != SceneState::Playing {
            self.state = SceneState::Paused;
        }
    }

    /// Enter play mode
    pub fn play(&mut self) {
        if self.state != SceneState::Destroyed {
            self.state = SceneState::Playing;
        }
    }

    /// Suspend gameplay updates (edit mode)
    pub fn pause(&mut self) {
        if self.state != SceneState::Destroyed {
            self.state = SceneState::Paused;
        }
    }

    /// Update every enabled component of every enabled object
    ///
    /// No-op unless the scene is playing.
    pub fn update(&mut self, dt: f32) {
        if self.state != SceneState::Playing {
            return;
        }
        self.for_each_component(true, |component, ctx| component.update(ctx, dt));
    }

    /// Step the physics world and dispatch trigger-enter callbacks
    pub fn do_physics(&mut self, dt: f32) {
        if self.state != SceneState::Playing {
            return;
        }

        // Mirror body-carrying objects into the physics world
        let mut stepped: Vec<GameObjectId> = Vec::new();
        let ids: Vec<GameObjectId> = self.objects.keys().collect();
        for id in ids {
            let object = &self.objects[id];
            if let Some(body) = object.get::<RigidBody>() {
                if body.kind != BodyKind::Static {
                    stepped.push(id);
                }
                self.physics.upsert_body(
                    id,
                    body.kind,
                    body.collider.clone(),
                    object.position(),
                    body.linear_velocity(),
                    false,
                );
            } else if let Some(volume) = object.get::<TriggerVolume>() {
                self.physics.upsert_body(
                    id,
                    BodyKind::Static,
                    volume.collider.clone(),
                    object.position(),
                    Vec3::zeros(),
                    true,
                );
            }
        }

        self.physics.step(dt);

        // Write integrated positions back to moving objects
        for id in stepped {
            if let (Some(position), Some(object)) =
                (self.physics.body_position(id), self.objects.get_mut(id))
            {
                object.set_position(position);
            }
        }

        for event in self.physics.drain_events() {
            log::debug!("Trigger enter: {:?} <- {:?}", event.trigger, event.other);
            self.dispatch_trigger(event.trigger, event.other);
            self.dispatch_trigger(event.other, event.trigger);
        }
    }

    /// Collect draw items from every enabled renderer, sorted by material
    /// so the backend rebinds shaders as little as possible
    pub fn pre_render(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        self.each::<RenderComponent>(|id, renderer| {
            if renderer.mesh().is_empty() {
                return;
            }
            let enabled = self.objects.get(id).is_some_and(GameObject::is_enabled);
            if !enabled {
                return;
            }
            if let Some(model) = self.world_transform(id) {
                items.push(DrawItem {
                    model,
                    mesh: renderer.mesh().to_string(),
                    material: renderer.material().to_string(),
                });
            }
        });
        items.sort_by(|a, b| a.material.cmp(&b.material));
        items
    }

    /// Tear down the whole graph and mark the scene destroyed
    pub fn destroy(&mut self) {
        self.objects.clear();
        self.roots.clear();
        self.live_index.clear();
        self.lights.clear();
        self.main_camera = None;
        self.physics = PhysicsWorld::new();
        self.state = SceneState::Destroyed;
    }

    // ------------------------------------------------------------------
    // Lights
    // ------------------------------------------------------------------

    /// Add a light, rejecting additions past [`Scene::MAX_LIGHTS`]
    ///
    /// Returns the light's index on success; the list is untouched on
    /// rejection.
    pub fn add_light(&mut self, light: Light) -> Result<usize, SceneError> {
        if self.lights.len() >= Self::MAX_LIGHTS {
            return Err(SceneError::TooManyLights {
                max: Self::MAX_LIGHTS,
            });
        }
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    /// The scene's lights
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Remove a light by index
    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        if index < self.lights.len() {
            Some(self.lights.remove(index))
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize the whole graph to a JSON document
    pub fn to_json(&self) -> Result<Value, SceneError> {
        let main_camera = self
            .main_camera
            .and_then(|id| self.objects.get(id))
            .map(|object| object.name().to_string());

        let objects = self
            .roots
            .iter()
            .map(|&id| self.object_to_json(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(serde_json::json!({
            "name": self.name,
            "lights": serde_json::to_value(&self.lights)?,
            "main_camera": main_camera,
            "objects": objects,
        }))
    }

    fn object_to_json(&self, id: GameObjectId) -> Result<Value, SceneError> {
        let object = self.objects.get(id).ok_or(SceneError::NoSuchObject)?;

        let mut components = Vec::new();
        for slot in &object.components {
            if let Some(component) = &slot.component {
                components.push(serde_json::json!({
                    "type": component.type_name(),
                    "data": component.to_json()?,
                }));
            }
        }

        let children = object
            .children
            .iter()
            .map(|&child| self.object_to_json(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(serde_json::json!({
            "name": object.name(),
            "position": serde_json::to_value(object.transform().position)?,
            "rotation": serde_json::to_value(object.transform().rotation)?,
            "scale": serde_json::to_value(object.transform().scale)?,
            "enabled": object.is_enabled(),
            "components": components,
            "children": children,
        }))
    }

    /// Rebuild a scene from a JSON document
    ///
    /// A missing required field aborts with
    /// [`SceneError::MalformedSceneFile`] before any scene is handed to the
    /// caller; components of unregistered types are skipped with a warning.
    pub fn from_json(value: &Value, types: Arc<ComponentTypes>) -> Result<Self, SceneError> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("name"))?;

        let lights: Vec<Light> = serde_json::from_value(
            value.get("lights").ok_or_else(|| malformed("lights"))?.clone(),
        )
        .map_err(|_| malformed("lights"))?;
        if lights.len() > Self::MAX_LIGHTS {
            return Err(malformed("lights"));
        }

        let main_camera = value
            .get("main_camera")
            .ok_or_else(|| malformed("main_camera"))?;

        let records = value
            .get("objects")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("objects"))?;

        let mut scene = Scene::new(name, types);
        scene.lights = lights;
        for record in records {
            scene.object_from_json(record, None)?;
        }

        if let Some(camera_name) = main_camera.as_str() {
            let id = scene
                .find_object_by_name(camera_name)
                .ok_or_else(|| malformed("main_camera"))?;
            scene.set_main_camera(id).map_err(|_| malformed("main_camera"))?;
        }

        scene.state = SceneState::AwakePending;
        Ok(scene)
    }

    fn object_from_json(
        &mut self,
        record: &Value,
        parent: Option<GameObjectId>,
    ) -> Result<GameObjectId, SceneError> {
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("name"))?
            .to_string();
        let position: Vec3 = required_field(record, "position")?;
        let rotation: Vec3 = required_field(record, "rotation")?;
        let scale: Vec3 = required_field(record, "scale")?;
        let enabled = record
            .get("enabled")
            .and_then(Value::as_bool)
            .ok_or_else(|| malformed("enabled"))?;
        let components = record
            .get("components")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("components"))?;
        let children = record
            .get("children")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("children"))?;

        let id = self.create_game_object(name.clone());
        {
            let object = &mut self.objects[id];
            object.set_position(position);
            object.set_rotation(rotation);
            object.set_scale(scale);
            object.set_enabled(enabled);
        }
        if let Some(parent) = parent {
            self.add_child(parent, id)?;
        }

        let types = Arc::clone(&self.types);
        for entry in components {
            let type_name = entry
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("components.type"))?;
            let data = entry.get("data").unwrap_or(&Value::Null);
            match types.create(type_name, data) {
                Ok(component) => self.add_boxed_component(id, component)?,
                Err(SceneError::UnknownComponentType(unknown)) => {
                    log::warn!(
                        "Skipping component of unknown type '{}' on object '{}'",
                        unknown,
                        name
                    );
                }
                Err(other) => return Err(other),
            }
        }

        for child in children {
            self.object_from_json(child, Some(id))?;
        }
        Ok(id)
    }

    /// Serialize the scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(&json)?)?;
        log::info!("Saved scene '{}' to {}", self.name, path.as_ref().display());
        Ok(())
    }

    /// Load a scene from a JSON file
    pub fn load(path: impl AsRef<Path>, types: Arc<ComponentTypes>) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&contents)?;
        Self::from_json(&value, types)
    }

    // ------------------------------------------------------------------
    // Pass machinery
    // ------------------------------------------------------------------

    fn for_each_component(
        &mut self,
        only_enabled: bool,
        mut f: impl FnMut(&mut Box<dyn Component>, &mut ComponentCtx<'_>),
    ) {
        let mut commands = SceneCommands::default();
        let ids: Vec<GameObjectId> = self.objects.keys().collect();
        for id in ids {
            let enabled = self.objects.get(id).is_some_and(GameObject::is_enabled);
            if only_enabled && !enabled {
                continue;
            }
            let count = self.objects.get(id).map_or(0, GameObject::component_count);
            for i in 0..count {
                if only_enabled {
                    let skip = self
                        .objects
                        .get(id)
                        .and_then(|o| o.components.get(i))
                        .and_then(|slot| slot.component.as_deref())
                        .is_some_and(|c| !c.is_enabled());
                    if skip {
                        continue;
                    }
                }
                self.run_slot(id, i, &mut commands, |component, ctx| f(component, ctx));
            }
        }
        self.apply_commands(commands);
    }

    fn run_slot(
        &mut self,
        id: GameObjectId,
        i: usize,
        commands: &mut SceneCommands,
        f: impl FnOnce(&mut Box<dyn Component>, &mut ComponentCtx<'_>),
    ) {
        let Some(mut component) = self.objects.get_mut(id).and_then(|o| o.take_slot(i)) else {
            return;
        };
        if let Some(object) = self.objects.get_mut(id) {
            let mut ctx = ComponentCtx::new(id, object, commands);
            f(&mut component, &mut ctx);
        }
        if let Some(object) = self.objects.get_mut(id) {
            object.restore_slot(i, component);
        }
    }

    fn dispatch_trigger(&mut self, id: GameObjectId, other: GameObjectId) {
        let enabled = self.objects.get(id).is_some_and(GameObject::is_enabled);
        if !enabled {
            return;
        }
        let mut commands = SceneCommands::default();
        let count = self.objects.get(id).map_or(0, GameObject::component_count);
        for i in 0..count {
            self.run_slot(id, i, &mut commands, |component, ctx| {
                component.on_trigger_enter(ctx, other);
            });
        }
        self.apply_commands(commands);
    }

    fn apply_commands(&mut self, commands: SceneCommands) {
        for command in commands.commands {
            match command {
                SceneCommand::DestroyObject(id) => self.destroy_game_object(id),
                SceneCommand::SetObjectEnabled(id, enabled) => {
                    if let Some(object) = self.objects.get_mut(id) {
                        object.set_enabled(enabled);
                    }
                }
            }
        }
    }
}

fn malformed(field: &str) -> SceneError {
    SceneError::MalformedSceneFile {
        field: field.to_string(),
    }
}

fn required_field<T: serde::de::DeserializeOwned>(
    record: &Value,
    field: &str,
) -> Result<T, SceneError> {
    let value = record.get(field).ok_or_else(|| malformed(field))?;
    serde_json::from_value(value.clone()).map_err(|_| malformed(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ColliderShape;
    use crate::scene::components::{self, Camera, RigidBody, RotatingBehaviour, TriggerVolume};
    use approx::assert_relative_eq;
    use serde::{Deserialize, Serialize};

    fn engine_types() -> Arc<ComponentTypes> {
        let mut types = ComponentTypes::new();
        components::register_engine_components(&mut types);
        Arc::new(types)
    }

    fn empty_scene(name: &str) -> Scene {
        Scene::new(name, engine_types())
    }

    /// Destroys its own object after a fixed number of updates
    #[derive(Debug, Serialize, Deserialize)]
    struct Fuse {
        updates_left: u32,
    }

    impl Component for Fuse {
        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }

        fn update(&mut self, ctx: &mut ComponentCtx<'_>, _dt: f32) {
            if self.updates_left == 0 {
                let id = ctx.object_id();
                ctx.commands().destroy_object(id);
            } else {
                self.updates_left -= 1;
            }
        }

        fn to_json(&self) -> Result<serde_json::Value, SceneError> {
            Ok(serde_json::to_value(self)?)
        }
    }

    impl ComponentFromJson for Fuse {
        const TYPE_NAME: &'static str = "Fuse";

        fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
            Ok(serde_json::from_value(value.clone())?)
        }
    }

    #[test]
    fn test_one_component_per_type() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("tower");
        scene.add_component(id, RotatingBehaviour::default()).unwrap();

        let result = scene.add_component(id, RotatingBehaviour::default());
        assert!(matches!(result, Err(SceneError::DuplicateComponent { .. })));
        assert_eq!(scene.object(id).unwrap().component_count(), 1);
    }

    #[test]
    fn test_get_never_constructs() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("tower");
        assert!(scene.get_component::<Camera>(id).is_none());
        assert!(scene.get_component::<Camera>(id).is_none());
    }

    #[test]
    fn test_each_skips_destroyed_instances() {
        let mut scene = empty_scene("test");
        let keep = scene.create_game_object("keep");
        let drop = scene.create_game_object("drop");
        scene.add_component(keep, RotatingBehaviour::default()).unwrap();
        scene.add_component(drop, RotatingBehaviour::default()).unwrap();

        scene.destroy_game_object(drop);

        let mut visited = Vec::new();
        scene.each::<RotatingBehaviour>(|id, _| visited.push(id));
        assert_eq!(visited, vec![keep]);
    }

    #[test]
    fn test_light_cap_rejects_without_mutating() {
        let mut scene = empty_scene("test");
        for _ in 0..Scene::MAX_LIGHTS {
            scene.add_light(Light::default()).unwrap();
        }

        let result = scene.add_light(Light::default());
        assert!(matches!(result, Err(SceneError::TooManyLights { max: 8 })));
        assert_eq!(scene.lights().len(), Scene::MAX_LIGHTS);
    }

    #[test]
    fn test_main_camera_requires_camera_component() {
        let mut scene = empty_scene("test");
        let plain = scene.create_game_object("plain");
        assert!(matches!(
            scene.set_main_camera(plain),
            Err(SceneError::MissingComponent { .. })
        ));

        let rig = scene.create_game_object("rig");
        scene.add_component(rig, Camera::default()).unwrap();
        scene.set_main_camera(rig).unwrap();
        assert_eq!(scene.main_camera(), Some(rig));
    }

    #[test]
    fn test_reparenting_rejects_cycles() {
        let mut scene = empty_scene("test");
        let a = scene.create_game_object("a");
        let b = scene.create_game_object("b");
        let c = scene.create_game_object("c");
        scene.add_child(a, b).unwrap();
        scene.add_child(b, c).unwrap();

        assert!(matches!(scene.add_child(c, a), Err(SceneError::HierarchyCycle)));
        assert!(matches!(scene.add_child(a, a), Err(SceneError::HierarchyCycle)));

        // The failed calls left the graph intact
        assert_eq!(scene.object(b).unwrap().parent(), Some(a));
        assert_eq!(scene.object(c).unwrap().parent(), Some(b));
    }

    #[test]
    fn test_world_transform_reflects_parent_motion_same_frame() {
        let mut scene = empty_scene("test");
        let parent = scene.create_game_object("parent");
        let child = scene.create_game_object("child");
        scene.add_child(parent, child).unwrap();
        scene.object_mut(child).unwrap().set_position(Vec3::new(1.0, 0.0, 0.0));

        scene.object_mut(parent).unwrap().set_position(Vec3::new(0.0, 5.0, 0.0));
        let world = scene.world_transform(child).unwrap();
        assert_relative_eq!(world[(0, 3)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(world[(1, 3)], 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_update_only_runs_while_playing() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("spinner");
        scene
            .add_component(
                id,
                RotatingBehaviour {
                    rotation_speed: Vec3::new(0.0, 90.0, 0.0),
                },
            )
            .unwrap();

        scene.awake();
        assert_eq!(scene.state(), SceneState::Paused);
        scene.update(1.0);
        assert_relative_eq!(scene.object(id).unwrap().rotation().y, 0.0);

        scene.play();
        scene.update(1.0);
        assert_relative_eq!(scene.object(id).unwrap().rotation().y, 90.0);

        scene.pause();
        scene.update(1.0);
        assert_relative_eq!(scene.object(id).unwrap().rotation().y, 90.0);
    }

    #[test]
    fn test_disabled_objects_skip_updates() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("spinner");
        scene.add_component(id, RotatingBehaviour::default()).unwrap();
        scene.object_mut(id).unwrap().set_enabled(false);

        scene.awake();
        scene.play();
        scene.update(1.0);
        assert_relative_eq!(scene.object(id).unwrap().rotation().z, 0.0);
    }

    #[test]
    fn test_deferred_destroy_from_update_hook() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("bomb");
        scene.add_component(id, Fuse { updates_left: 1 }).unwrap();
        scene.awake();
        scene.play();

        scene.update(0.016);
        assert!(scene.object(id).is_some());

        scene.update(0.016);
        assert!(scene.object(id).is_none());
        let mut count = 0;
        scene.each::<Fuse>(|_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_destroy_takes_descendants_along() {
        let mut scene = empty_scene("test");
        let root = scene.create_game_object("root");
        let child = scene.create_game_object("child");
        let grandchild = scene.create_game_object("grandchild");
        scene.add_child(root, child).unwrap();
        scene.add_child(child, grandchild).unwrap();

        scene.destroy_game_object(root);
        assert_eq!(scene.object_count(), 0);
        assert!(scene.roots().is_empty());
    }

    #[test]
    fn test_dynamic_body_moves_and_enters_trigger() {
        let mut scene = empty_scene("test");

        let runner = scene.create_game_object("runner");
        let mut body = RigidBody::new(BodyKind::Dynamic, ColliderShape::Sphere { radius: 0.5 });
        body.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        scene.add_component(runner, body).unwrap();

        let goal = scene.create_game_object("goal");
        scene.object_mut(goal).unwrap().set_position(Vec3::new(2.0, 0.0, 0.0));
        scene
            .add_component(goal, TriggerVolume::new(ColliderShape::Sphere { radius: 1.0 }))
            .unwrap();

        scene.awake();
        scene.play();

        scene.do_physics(0.25);
        assert_relative_eq!(scene.object(runner).unwrap().position().x, 0.25);

        // After a second, the runner is inside the goal radius
        scene.do_physics(0.75);
        assert_relative_eq!(scene.object(runner).unwrap().position().x, 1.0);
    }

    fn build_sample_scene() -> Scene {
        let mut scene = empty_scene("level_one");
        scene
            .add_light(Light {
                position: Vec3::new(0.0, 10.0, 0.0),
                color: Vec3::new(1.0, 0.9, 0.8),
                range: 50.0,
            })
            .unwrap();

        let tower = scene.create_game_object("tower");
        scene.object_mut(tower).unwrap().set_position(Vec3::new(1.0, 2.0, 3.0));
        scene
            .add_component(tower, RigidBody::new_static(ColliderShape::Box {
                half_extents: Vec3::new(1.0, 2.0, 1.0),
            }))
            .unwrap();

        let turret = scene.create_game_object("turret");
        scene.add_child(tower, turret).unwrap();
        scene
            .add_component(
                turret,
                RotatingBehaviour {
                    rotation_speed: Vec3::new(0.0, 45.0, 0.0),
                },
            )
            .unwrap();

        let rig = scene.create_game_object("camera_rig");
        scene.add_component(rig, Camera::default()).unwrap();
        scene.set_main_camera(rig).unwrap();
        scene
    }

    #[test]
    fn test_json_round_trip_preserves_graph_and_camera() {
        let scene = build_sample_scene();
        let json = scene.to_json().unwrap();

        let restored = Scene::from_json(&json, engine_types()).unwrap();
        assert_eq!(restored.name(), "level_one");
        assert_eq!(restored.state(), SceneState::AwakePending);
        assert_eq!(restored.object_count(), 3);
        assert_eq!(restored.lights().len(), 1);

        let tower = restored.find_object_by_name("tower").unwrap();
        assert_eq!(restored.object(tower).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(restored.object(tower).unwrap().has::<RigidBody>());

        let turret = restored.find_object_by_name("turret").unwrap();
        assert_eq!(restored.object(turret).unwrap().parent(), Some(tower));
        let spin = restored.get_component::<RotatingBehaviour>(turret).unwrap();
        assert_relative_eq!(spin.rotation_speed.y, 45.0);

        let rig = restored.find_object_by_name("camera_rig").unwrap();
        assert_eq!(restored.main_camera(), Some(rig));

        // A second serialization is bit-identical
        assert_eq!(restored.to_json().unwrap(), json);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let scene = build_sample_scene();
        let mut json = scene.to_json().unwrap();
        json.as_object_mut().unwrap().remove("lights");

        let result = Scene::from_json(&json, engine_types());
        assert!(matches!(
            result,
            Err(SceneError::MalformedSceneFile { field }) if field == "lights"
        ));
    }

    #[test]
    fn test_unknown_component_type_is_skipped() {
        let mut scene = empty_scene("test");
        let id = scene.create_game_object("modded");
        scene.add_component(id, Fuse { updates_left: 3 }).unwrap();
        let json = scene.to_json().unwrap();

        // Fuse is not registered in the engine table
        let restored = Scene::from_json(&json, engine_types()).unwrap();
        let modded = restored.find_object_by_name("modded").unwrap();
        assert_eq!(restored.object(modded).unwrap().component_count(), 0);
    }

    #[test]
    fn test_too_many_lights_in_file_is_malformed() {
        let scene = empty_scene("test");
        let mut json = scene.to_json().unwrap();
        let lights: Vec<Light> = (0..9).map(|_| Light::default()).collect();
        json.as_object_mut()
            .unwrap()
            .insert("lights".to_string(), serde_json::to_value(&lights).unwrap());

        let result = Scene::from_json(&json, engine_types());
        assert!(matches!(result, Err(SceneError::MalformedSceneFile { .. })));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join("siege_engine_scene_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level_one.json");

        let scene = build_sample_scene();
        scene.save(&path).unwrap();

        let restored = Scene::load(&path, engine_types()).unwrap();
        assert_eq!(restored.object_count(), scene.object_count());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_destroyed_scene_stays_down() {
        let mut scene = build_sample_scene();
        scene.destroy();
        assert_eq!(scene.state(), SceneState::Destroyed);
        assert_eq!(scene.object_count(), 0);

        scene.play();
        assert_eq!(scene.state(), SceneState::Destroyed);
    }
}
