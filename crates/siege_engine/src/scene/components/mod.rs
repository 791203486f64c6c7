//! Engine-supplied component types

pub mod camera;
pub mod render;
pub mod rigid_body;
pub mod rotating;
pub mod trigger_volume;

pub use camera::Camera;
pub use render::RenderComponent;
pub use rigid_body::RigidBody;
pub use rotating::RotatingBehaviour;
pub use trigger_volume::TriggerVolume;

use crate::scene::ComponentTypes;

/// Register every engine-supplied component type
pub fn register_engine_components(types: &mut ComponentTypes) {
    types.register::<Camera>();
    types.register::<RenderComponent>();
    types.register::<RigidBody>();
    types.register::<TriggerVolume>();
    types.register::<RotatingBehaviour>();
}
