use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::view::NoFrustumCulling;

use super::materials::{apply_tint, standard_material};
use super::meshes::{mesh_for, wireframe_edges};
use crate::engine::controller::BackgroundController;
use crate::engine::glyph::GlyphBitmap;
use crate::engine::scene::object::GeometryDesc;
use crate::engine::scene::{Behavior, ObjectKey, SceneObject};

/// Links an entity to the pool object it mirrors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackdropObject(pub ObjectKey);

/// Mesh whose two vertices track a circuit connection's endpoints.
#[derive(Component)]
pub struct ConnectionLine {
    mesh: Handle<Mesh>,
    /// Endpoints last written into `mesh`.
    points: Option<[Vec3; 2]>,
}

#[derive(Component)]
pub struct GlyphTexture {
    image: Handle<Image>,
    revision: u32,
}

/// Controller revision the current entities were spawned from.
#[derive(Resource, Default)]
pub struct SpawnedScene {
    revision: Option<u64>,
}

/// Replace every backdrop entity when the controller has rebuilt.
pub fn spawn_generation(
    controller: Res<BackgroundController>,
    mut spawned: ResMut<SpawnedScene>,
    existing: Query<Entity, With<BackdropObject>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let revision = controller.revision();
    if spawned.revision == Some(revision) {
        return;
    }

    let mut despawned = 0;
    for entity in &existing {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    let mut count = 0;
    for (key, object) in controller.pool().all() {
        spawn_object(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut images,
            key,
            object,
        );
        count += 1;
    }

    info!(
        "Backdrop revision {}: spawned {} entities, despawned {}",
        revision, count, despawned
    );
    spawned.revision = Some(revision);
}

fn spawn_object(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    key: ObjectKey,
    object: &SceneObject,
) {
    let lit = matches!(object.geometry, GeometryDesc::Strip { .. });
    let base_mesh = mesh_for(&object.geometry);
    let body_mesh = if object.material.wireframe {
        wireframe_edges(&base_mesh)
    } else {
        base_mesh.clone()
    };
    let mesh = meshes.add(body_mesh);
    let mut material = standard_material(&object.material, lit);

    let mut entity = commands.spawn((
        BackdropObject(key),
        Mesh3d(mesh.clone()),
        object.transform(),
        Visibility::Visible,
    ));

    if let Some(sprite) = &object.glyph {
        let image = images.add(glyph_image(&sprite.bitmap));
        material.base_color_texture = Some(image.clone());
        entity.insert(GlyphTexture {
            image,
            revision: sprite.revision,
        });
    }
    if let Behavior::CircuitConnection(_) = object.behavior {
        entity.insert((
            ConnectionLine {
                mesh,
                points: None,
            },
            NoFrustumCulling,
        ));
    }
    entity.insert(MeshMaterial3d(materials.add(material)));

    if object.decorations.is_empty() {
        return;
    }
    entity.with_children(|parent| {
        for decoration in &object.decorations {
            let mesh = if decoration.material.wireframe {
                wireframe_edges(&base_mesh)
            } else {
                base_mesh.clone()
            };
            parent.spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(standard_material(&decoration.material, false))),
                Transform::from_scale(Vec3::splat(decoration.scale)),
            ));
        }
    });
}

pub fn glyph_image(bitmap: &GlyphBitmap) -> Image {
    Image::new(
        Extent3d {
            width: bitmap.size,
            height: bitmap.size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bitmap.pixels.clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Copy transforms, tints, line endpoints and redrawn glyphs from the pool.
pub fn sync_objects(
    controller: Res<BackgroundController>,
    mut objects: Query<(
        &BackdropObject,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
        Option<&mut ConnectionLine>,
        Option<&mut GlyphTexture>,
    )>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let pool = controller.pool();
    for (link, mut transform, material, line, glyph) in &mut objects {
        let Some(object) = pool.get(link.0) else {
            continue;
        };

        let target = object.transform();
        if *transform != target {
            *transform = target;
        }
        apply_tint(
            &mut materials,
            &material.0,
            object.material.color.with_alpha(object.material.opacity),
        );

        if let (Some(mut line), Behavior::CircuitConnection(connection)) =
            (line, &object.behavior)
        {
            if line.points != Some(connection.points) {
                if let Some(mesh) = meshes.get_mut(&line.mesh) {
                    let [start, end] = connection.points;
                    mesh.insert_attribute(
                        Mesh::ATTRIBUTE_POSITION,
                        vec![start.to_array(), end.to_array()],
                    );
                }
                line.points = Some(connection.points);
            }
        }

        if let (Some(mut glyph), Some(sprite)) = (glyph, &object.glyph) {
            if glyph.revision != sprite.revision {
                if let Some(image) = images.get_mut(&glyph.image) {
                    image.data = Some(sprite.bitmap.pixels.clone());
                }
                glyph.revision = sprite.revision;
            }
        }
    }
}
