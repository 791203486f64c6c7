//! Initial scene and asset assembly

use siege_engine::prelude::*;

use crate::components::EnemyMovement;
use crate::config::GameplayConfig;
use crate::lanes::{self, LaneTable};

/// Fill the resource stores with everything the level references
pub fn register_assets(resources: &mut ResourceManager) {
    resources.create(MeshResource::new("ground", "meshes/ground.obj"));
    resources.create(MeshResource::new("tower", "meshes/tower.obj"));
    resources.create(MeshResource::new("banner", "meshes/banner.obj"));
    resources.create(MeshResource::new("goblin", "meshes/goblin.obj"));

    resources.create(Texture2D::new("grass", "textures/grass.png"));
    resources.create(Texture2D::new("stone", "textures/stone.png"));
    resources.create(Texture2D::new("goblin_skin", "textures/goblin.png"));

    resources.create(ShaderProgram::new(
        "lit",
        "shaders/lit.vert",
        "shaders/lit.frag",
    ));

    resources.create(
        Material::new("ground", "lit")
            .with_texture("grass")
            .with_base_color(Vec3::new(0.3, 0.6, 0.3)),
    );
    resources.create(
        Material::new("tower_stone", "lit")
            .with_texture("stone")
            .with_base_color(Vec3::new(0.7, 0.7, 0.7)),
    );
    resources.create(
        Material::new("goblin", "lit")
            .with_texture("goblin_skin")
            .with_base_color(Vec3::new(0.4, 0.7, 0.3)),
    );
}

/// Build the level into an empty scene: tower, gate trigger, camera, lights
pub fn populate(scene: &mut Scene, lanes: &LaneTable) -> Result<(), SceneError> {
    scene.add_light(Light {
        position: Vec3::new(12.76, -10.42, 20.0),
        color: Vec3::new(1.0, 0.95, 0.85),
        range: 120.0,
    })?;
    scene.add_light(Light {
        position: Vec3::new(0.0, 0.0, 30.0),
        color: Vec3::new(0.4, 0.4, 0.5),
        range: 200.0,
    })?;

    let ground = scene.create_game_object("ground");
    scene.add_component(ground, RenderComponent::new("ground", "ground"))?;

    let tower = scene.create_game_object("tower");
    scene
        .object_mut(tower)
        .ok_or(SceneError::NoSuchObject)?
        .set_position(Vec3::new(12.76, -10.42, 0.0));
    scene.add_component(tower, RenderComponent::new("tower", "tower_stone"))?;
    scene.add_component(
        tower,
        RigidBody::new_static(ColliderShape::Box {
            half_extents: Vec3::new(1.5, 1.5, 3.0),
        }),
    )?;

    // Spinning banner on top of the tower
    let banner = scene.create_game_object("banner");
    scene
        .object_mut(banner)
        .ok_or(SceneError::NoSuchObject)?
        .set_position(Vec3::new(0.0, 0.0, 4.0));
    scene.add_component(banner, RenderComponent::new("banner", "tower_stone"))?;
    scene.add_component(
        banner,
        RotatingBehaviour {
            rotation_speed: Vec3::new(0.0, 0.0, 45.0),
        },
    )?;
    scene.add_child(tower, banner)?;

    // Gate trigger the lanes converge on; goblins entering it breach the base
    let gate = scene.create_game_object("gate");
    scene
        .object_mut(gate)
        .ok_or(SceneError::NoSuchObject)?
        .set_position(lanes::goal_position());
    scene.add_component(
        gate,
        TriggerVolume::new(ColliderShape::Cylinder {
            radius: 1.0,
            half_height: 2.0,
        }),
    )?;

    let camera = scene.create_game_object("main_camera");
    {
        let object = scene.object_mut(camera).ok_or(SceneError::NoSuchObject)?;
        object.set_position(Vec3::new(12.76, -10.42, 6.0));
        object.set_rotation(Vec3::new(90.0, 0.0, lanes.camera_yaw(0)));
    }
    scene.add_component(camera, Camera::default())?;
    scene.set_main_camera(camera)?;

    Ok(())
}

/// Spawn one goblin at a lane entrance, walking toward the goal
pub fn spawn_goblin(
    scene: &mut Scene,
    position: Vec3,
    gameplay: &GameplayConfig,
    serial: u32,
) -> Result<GameObjectId, SceneError> {
    let id = scene.create_game_object(format!("goblin_{serial}"));
    scene
        .object_mut(id)
        .ok_or(SceneError::NoSuchObject)?
        .set_position(position);
    scene.add_component(id, RenderComponent::new("goblin", "goblin"))?;
    scene.add_component(
        id,
        RigidBody::new(BodyKind::Dynamic, ColliderShape::Sphere { radius: 0.5 }),
    )?;
    scene.add_component(
        id,
        EnemyMovement::new(
            gameplay.goblin_speed,
            gameplay.goblin_damage,
            lanes::goal_position(),
        ),
    )?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::register_game_components;
    use std::sync::Arc;

    fn game_types() -> Arc<ComponentTypes> {
        let mut types = ComponentTypes::new();
        siege_engine::scene::components::register_engine_components(&mut types);
        register_game_components(&mut types);
        Arc::new(types)
    }

    #[test]
    fn test_level_round_trips_through_json() {
        let lanes = LaneTable::default();
        let mut scene = Scene::new("tower_gardens", game_types());
        populate(&mut scene, &lanes).unwrap();
        spawn_goblin(&mut scene, lanes.spawn_position(2), &crate::config::GameConfig::default().gameplay, 1)
            .unwrap();

        let json = scene.to_json().unwrap();
        let restored = Scene::from_json(&json, game_types()).unwrap();

        assert_eq!(restored.object_count(), scene.object_count());
        assert_eq!(restored.lights().len(), 2);
        let camera = restored.find_object_by_name("main_camera").unwrap();
        assert_eq!(restored.main_camera(), Some(camera));

        let tower = restored.find_object_by_name("tower").unwrap();
        let banner = restored.find_object_by_name("banner").unwrap();
        assert_eq!(restored.object(banner).unwrap().parent(), Some(tower));

        let goblin = restored.find_object_by_name("goblin_1").unwrap();
        assert!(restored.object(goblin).unwrap().has::<EnemyMovement>());
    }

    #[test]
    fn test_assets_cover_every_material_reference() {
        let mut resources = ResourceManager::new();
        register_assets(&mut resources);

        for material in ["ground", "tower_stone", "goblin"] {
            let handle: std::sync::Arc<Material> = resources.get(material).unwrap();
            assert!(resources.get::<ShaderProgram>(&handle.shader).is_some());
            assert!(resources.get::<Texture2D>(&handle.texture).is_some());
        }
    }
}
