use bevy::color::Color;
use bevy::math::{EulerRot, Quat, Vec2, Vec3};
use bevy::transform::components::Transform;
use constants::scene::LINE_PICK_THRESHOLD;

use crate::engine::geometry::{GearOutline, StripMesh};
use crate::engine::glyph::GlyphBitmap;

/// Position of a circuit node in the pool's node arena.
pub type NodeIndex = usize;
/// Position of a circuit connection in the pool's connection arena.
pub type ConnectionIndex = usize;

/// Stable handle of a pooled object within one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Addresses any live object, including the two singleton slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    Strip,
    Particles,
    Pooled(ObjectId),
}

/// Sinusoidal float offset parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub phase: f32,
    pub amount: f32,
}

impl FloatMotion {
    pub fn sin(&self, t: f32, speed_factor: f32) -> f32 {
        (t * self.speed * speed_factor + self.phase).sin() * self.amount
    }

    pub fn cos(&self, t: f32, speed_factor: f32) -> f32 {
        (t * self.speed * speed_factor + self.phase).cos() * self.amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingShape {
    /// Logical XY position driven by the velocity; render position adds float.
    pub anchor: Vec2,
    pub velocity: Vec3,
    pub spin: Vec2,
    pub float: FloatMotion,
    pub max_dist: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircuitNode {
    pub original_pos: Vec3,
    pub float: FloatMotion,
    pub pulse: f32,
    pub base_scale: f32,
    pub base_color: Color,
    pub index: NodeIndex,
    /// Incident edges, in the order they were attached.
    pub connections: Vec<ConnectionIndex>,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConnection {
    pub start: NodeIndex,
    pub end: NodeIndex,
    /// Line endpoints; also the path followed by packets on this edge.
    pub points: [Vec3; 2],
    pub base_opacity: f32,
}

impl CircuitConnection {
    pub fn other_end(&self, node: NodeIndex) -> Option<NodeIndex> {
        if self.start == node {
            Some(self.end)
        } else if self.end == node {
            Some(self.start)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HubNode {
    pub original_pos: Vec3,
    pub spin: Vec3,
    pub float: FloatMotion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GearSpin {
    pub original_pos: Vec3,
    pub spin: f32,
    pub float: FloatMotion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPacket {
    pub connection: ConnectionIndex,
    /// Always within `[0, 1]`.
    pub progress: f32,
    pub reverse: bool,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallingChar {
    pub fall_speed: f32,
    pub timer: f32,
    pub interval: f32,
    pub head: bool,
    /// Row position within the column, 0 at the head and approaching 1 at the tail.
    pub depth: f32,
    pub trail_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSymbol {
    pub anchor: Vec3,
    pub velocity: Vec3,
    pub float: FloatMotion,
}

/// Motion rule of an object. Exactly one per object.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    StripSurface,
    ParticleCloud,
    FloatingShape(FloatingShape),
    CircuitNode(CircuitNode),
    CircuitRing { parent: NodeIndex },
    CircuitConnection(CircuitConnection),
    HubNode(HubNode),
    Gear(GearSpin),
    DataPacket(DataPacket),
    FallingChar(FallingChar),
    FloatingSymbol(FloatingSymbol),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorTag {
    StripSurface,
    ParticleCloud,
    FloatingShape,
    CircuitNode,
    CircuitRing,
    CircuitConnection,
    HubNode,
    Gear,
    DataPacket,
    FallingChar,
    FloatingSymbol,
}

impl Behavior {
    pub fn tag(&self) -> BehaviorTag {
        match self {
            Self::StripSurface => BehaviorTag::StripSurface,
            Self::ParticleCloud => BehaviorTag::ParticleCloud,
            Self::FloatingShape(_) => BehaviorTag::FloatingShape,
            Self::CircuitNode(_) => BehaviorTag::CircuitNode,
            Self::CircuitRing { .. } => BehaviorTag::CircuitRing,
            Self::CircuitConnection(_) => BehaviorTag::CircuitConnection,
            Self::HubNode(_) => BehaviorTag::HubNode,
            Self::Gear(_) => BehaviorTag::Gear,
            Self::DataPacket(_) => BehaviorTag::DataPacket,
            Self::FallingChar(_) => BehaviorTag::FallingChar,
            Self::FloatingSymbol(_) => BehaviorTag::FloatingSymbol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolidKind {
    Icosahedron { radius: f32, subdivisions: u32 },
    Octahedron { radius: f32 },
    Tetrahedron { radius: f32 },
    Cube { size: f32 },
    Sphere { radius: f32, segments: u32 },
}

impl SolidKind {
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Self::Icosahedron { radius, .. }
            | Self::Octahedron { radius }
            | Self::Tetrahedron { radius }
            | Self::Sphere { radius, .. } => radius,
            Self::Cube { size } => size * 0.5 * 3f32.sqrt(),
        }
    }
}

/// What the host should build for an object's mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDesc {
    Strip { mesh: StripMesh, normals: Vec<Vec3> },
    PointCloud { positions: Vec<Vec3>, colors: Vec<Color> },
    Solid(SolidKind),
    Ring { inner: f32, outer: f32, segments: u32 },
    Gear(GearOutline),
    /// Two-point line; endpoints come from the connection's path buffer.
    Line,
    /// Unit quad textured with the object's glyph bitmap.
    GlyphQuad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: Color,
    pub opacity: f32,
    pub wireframe: bool,
    pub side: FaceSide,
    pub additive: bool,
}

impl MaterialDesc {
    pub fn basic(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: false,
            side: FaceSide::Front,
            additive: false,
        }
    }

    pub fn wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn side(mut self, side: FaceSide) -> Self {
        self.side = side;
        self
    }

    pub fn additive(mut self) -> Self {
        self.additive = true;
        self
    }
}

/// Child mesh sharing its parent's geometry and transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub material: MaterialDesc,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSprite {
    pub glyph: char,
    pub bitmap: GlyphBitmap,
    /// Bumped every time the bitmap is re-rasterised.
    pub revision: u32,
}

/// Ray-test volume in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitVolume {
    Sphere { center: Vec3, radius: f32 },
    Obb { transform: Transform, size: Vec3 },
    /// Everything within `threshold` of the segment counts as a hit.
    Segment {
        start: Vec3,
        end: Vec3,
        threshold: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub geometry: GeometryDesc,
    pub material: MaterialDesc,
    pub decorations: Vec<Decoration>,
    pub position: Vec3,
    /// Euler angles applied in X, Y, Z order.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub behavior: Behavior,
    pub glyph: Option<GlyphSprite>,
    /// Captured lazily by the hover resolver the first time it sees the object.
    pub original_scale: Option<Vec3>,
}

impl SceneObject {
    pub fn new(geometry: GeometryDesc, material: MaterialDesc, behavior: Behavior) -> Self {
        Self {
            geometry,
            material,
            decorations: Vec::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            behavior,
            glyph: None,
            original_scale: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    pub fn with_glyph(mut self, glyph: char, bitmap: GlyphBitmap) -> Self {
        self.glyph = Some(GlyphSprite {
            glyph,
            bitmap,
            revision: 0,
        });
        self
    }

    pub fn tag(&self) -> BehaviorTag {
        self.behavior.tag()
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            scale: self.scale,
        }
    }

    /// World-space picking volume, or `None` for objects the pointer ignores.
    pub fn hit_volume(&self) -> Option<HitVolume> {
        let max_scale = self.scale.max_element();
        let sphere = |radius: f32| HitVolume::Sphere {
            center: self.position,
            radius: radius * max_scale,
        };

        match (&self.behavior, &self.geometry) {
            (Behavior::StripSurface | Behavior::ParticleCloud | Behavior::FallingChar(_), _) => {
                None
            }
            (_, GeometryDesc::Solid(SolidKind::Cube { size })) => Some(HitVolume::Obb {
                transform: self.transform(),
                size: Vec3::splat(*size),
            }),
            (_, GeometryDesc::Solid(solid)) => Some(sphere(solid.bounding_radius())),
            (_, GeometryDesc::Ring { outer, .. }) => Some(sphere(*outer)),
            (_, GeometryDesc::Gear(outline)) => Some(sphere(outline.outer_radius)),
            (_, GeometryDesc::GlyphQuad) => Some(sphere(0.5)),
            (Behavior::CircuitConnection(connection), GeometryDesc::Line) => {
                let transform = self.transform();
                let [start, end] = connection.points;
                Some(HitVolume::Segment {
                    start: transform.transform_point(start),
                    end: transform.transform_point(end),
                    threshold: LINE_PICK_THRESHOLD,
                })
            }
            (_, GeometryDesc::Line | GeometryDesc::Strip { .. } | GeometryDesc::PointCloud { .. }) => {
                None
            }
        }
    }
}
