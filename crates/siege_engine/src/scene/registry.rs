//! Component type registration
//!
//! Maps stable type-name strings to factories that rebuild components from
//! their serialized JSON blobs. Built once at startup, shared read-only with
//! every scene; the per-type live-instance index lives on the scene that
//! owns the instances.

use std::any::TypeId;
use std::collections::HashMap;

use crate::scene::component::Component;
use crate::scene::error::SceneError;

/// Factory reconstructing a component from its serialized field map
pub type ComponentFactory = fn(&serde_json::Value) -> Result<Box<dyn Component>, SceneError>;

/// Deserialization support for a registrable component type
pub trait ComponentFromJson: Component + Sized {
    /// Stable type name used as the serialization tag
    const TYPE_NAME: &'static str;

    /// Rebuild the component from its serialized field map
    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError>;
}

/// Registration table from type name to factory
#[derive(Default)]
pub struct ComponentTypes {
    factories: HashMap<&'static str, ComponentFactory>,
    names: HashMap<TypeId, &'static str>,
}

impl ComponentTypes {
    /// Create an empty registration table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a factory for `T`, keyed by its stable type name
    pub fn register<T: ComponentFromJson + 'static>(&mut self) {
        let factory: ComponentFactory = |value| Ok(Box::new(T::from_json(value)?));
        self.factories.insert(T::TYPE_NAME, factory);
        self.names.insert(TypeId::of::<T>(), T::TYPE_NAME);
        log::debug!("Registered component type '{}'", T::TYPE_NAME);
    }

    /// Whether a type name has a registered factory
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered name for a concrete component type, if any
    pub fn name_of(&self, type_id: TypeId) -> Option<&'static str> {
        self.names.get(&type_id).copied()
    }

    /// Reconstruct a component from a type-name tag plus serialized fields
    ///
    /// Fails with [`SceneError::UnknownComponentType`] for unregistered tags;
    /// scene loading logs that and skips the slot rather than aborting.
    pub fn create(
        &self,
        type_name: &str,
        value: &serde_json::Value,
    ) -> Result<Box<dyn Component>, SceneError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| SceneError::UnknownComponentType(type_name.to_string()))?;
        factory(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Spin {
        speed: f32,
    }

    impl Component for Spin {
        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }

        fn to_json(&self) -> Result<serde_json::Value, SceneError> {
            Ok(serde_json::to_value(self)?)
        }
    }

    impl ComponentFromJson for Spin {
        const TYPE_NAME: &'static str = "Spin";

        fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
            Ok(serde_json::from_value(value.clone())?)
        }
    }

    #[test]
    fn test_registered_factory_round_trips() {
        let mut types = ComponentTypes::new();
        types.register::<Spin>();
        assert!(types.is_registered("Spin"));

        let blob = serde_json::json!({ "speed": 90.0 });
        let component = types.create("Spin", &blob).unwrap();
        let spin = component.as_any().downcast_ref::<Spin>().unwrap();
        assert_eq!(spin.speed, 90.0);
    }

    #[test]
    fn test_unknown_type_name_is_an_error() {
        let types = ComponentTypes::new();
        let result = types.create("NoSuchThing", &serde_json::Value::Null);
        assert!(matches!(result, Err(SceneError::UnknownComponentType(_))));
    }
}
