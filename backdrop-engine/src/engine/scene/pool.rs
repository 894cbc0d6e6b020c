use bevy::log::debug;

use super::object::{
    Behavior, BehaviorTag, CircuitConnection, CircuitNode, ConnectionIndex, DataPacket,
    FallingChar, NodeIndex, ObjectId, ObjectKey, SceneObject,
};

/// Sole owner of every live background object.
///
/// Pooled objects sit in one arena addressed by [`ObjectId`]; circuit nodes,
/// connections, packets and falling glyphs are additionally indexed in typed
/// lists so the stepper and hover resolver can reach them without scanning.
/// The strip surface and particle cloud live in dedicated singleton slots.
#[derive(Debug, Default)]
pub struct SceneObjectPool {
    objects: Vec<SceneObject>,
    nodes: Vec<ObjectId>,
    connections: Vec<ObjectId>,
    packets: Vec<ObjectId>,
    falling_chars: Vec<ObjectId>,
    strip: Option<SceneObject>,
    particles: Option<SceneObject>,
    generation: u64,
}

impl SceneObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `object` and return where it lives.
    ///
    /// Circuit nodes get their `index` and connections their arena slot
    /// assigned here. Adding a strip or particle cloud while one exists
    /// replaces the previous object.
    pub fn add(&mut self, mut object: SceneObject) -> ObjectKey {
        match object.tag() {
            BehaviorTag::StripSurface => {
                if self.strip.replace(object).is_some() {
                    debug!("Replaced existing strip surface");
                }
                return ObjectKey::Strip;
            }
            BehaviorTag::ParticleCloud => {
                if self.particles.replace(object).is_some() {
                    debug!("Replaced existing particle cloud");
                }
                return ObjectKey::Particles;
            }
            _ => {}
        }
        if let Behavior::CircuitNode(node) = &mut object.behavior {
            node.index = self.nodes.len();
        }

        let id = ObjectId(self.objects.len() as u32);
        match object.behavior {
            Behavior::CircuitNode(_) => self.nodes.push(id),
            Behavior::CircuitConnection(_) => self.connections.push(id),
            Behavior::DataPacket(_) => self.packets.push(id),
            Behavior::FallingChar(_) => self.falling_chars.push(id),
            _ => {}
        }
        self.objects.push(object);
        ObjectKey::Pooled(id)
    }

    /// Release every object. Returns how many were released; calling it on an
    /// empty pool is a no-op returning 0.
    pub fn clear(&mut self) -> usize {
        let released = self.len();
        self.objects.clear();
        self.nodes.clear();
        self.connections.clear();
        self.packets.clear();
        self.falling_chars.clear();
        self.strip = None;
        self.particles = None;
        if released > 0 {
            self.generation += 1;
        }
        released
    }

    pub fn len(&self) -> usize {
        self.objects.len() + self.strip.is_some() as usize + self.particles.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Incremented by every `clear()` that released something.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every live object with its key, singletons first.
    pub fn all(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        let strip = self.strip.iter().map(|o| (ObjectKey::Strip, o));
        let particles = self.particles.iter().map(|o| (ObjectKey::Particles, o));
        let pooled = self
            .objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectKey::Pooled(ObjectId(i as u32)), o));
        strip.chain(particles).chain(pooled)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        match key {
            ObjectKey::Strip => self.strip.as_ref(),
            ObjectKey::Particles => self.particles.as_ref(),
            ObjectKey::Pooled(id) => self.objects.get(id.index()),
        }
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        match key {
            ObjectKey::Strip => self.strip.as_mut(),
            ObjectKey::Particles => self.particles.as_mut(),
            ObjectKey::Pooled(id) => self.objects.get_mut(id.index()),
        }
    }

    pub fn strip(&self) -> Option<&SceneObject> {
        self.strip.as_ref()
    }

    pub fn strip_mut(&mut self) -> Option<&mut SceneObject> {
        self.strip.as_mut()
    }

    pub fn particles(&self) -> Option<&SceneObject> {
        self.particles.as_ref()
    }

    pub fn particles_mut(&mut self) -> Option<&mut SceneObject> {
        self.particles.as_mut()
    }

    pub fn pooled(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn pooled_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn nodes(&self) -> &[ObjectId] {
        &self.nodes
    }

    pub fn connections(&self) -> &[ObjectId] {
        &self.connections
    }

    pub fn packets(&self) -> &[ObjectId] {
        &self.packets
    }

    pub fn falling_chars(&self) -> &[ObjectId] {
        &self.falling_chars
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&CircuitNode> {
        let id = self.nodes.get(index)?;
        match &self.objects[id.index()].behavior {
            Behavior::CircuitNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut CircuitNode> {
        let id = *self.nodes.get(index)?;
        match &mut self.objects[id.index()].behavior {
            Behavior::CircuitNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn node_object(&self, index: NodeIndex) -> Option<&SceneObject> {
        self.nodes.get(index).map(|id| &self.objects[id.index()])
    }

    pub fn node_object_mut(&mut self, index: NodeIndex) -> Option<&mut SceneObject> {
        let id = *self.nodes.get(index)?;
        self.objects.get_mut(id.index())
    }

    pub fn connection(&self, index: ConnectionIndex) -> Option<&CircuitConnection> {
        let id = self.connections.get(index)?;
        match &self.objects[id.index()].behavior {
            Behavior::CircuitConnection(connection) => Some(connection),
            _ => None,
        }
    }

    pub fn connection_object_mut(&mut self, index: ConnectionIndex) -> Option<&mut SceneObject> {
        let id = *self.connections.get(index)?;
        self.objects.get_mut(id.index())
    }

    pub fn packet(&self, id: ObjectId) -> Option<&DataPacket> {
        match &self.objects.get(id.index())?.behavior {
            Behavior::DataPacket(packet) => Some(packet),
            _ => None,
        }
    }

    pub fn falling_char(&self, id: ObjectId) -> Option<&FallingChar> {
        match &self.objects.get(id.index())?.behavior {
            Behavior::FallingChar(glyph) => Some(glyph),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::object::{FloatMotion, GeometryDesc, MaterialDesc, SolidKind};
    use bevy::color::Color;
    use bevy::math::Vec3;

    fn solid(behavior: Behavior) -> SceneObject {
        SceneObject::new(
            GeometryDesc::Solid(SolidKind::Sphere {
                radius: 1.0,
                segments: 8,
            }),
            MaterialDesc::basic(Color::WHITE, 1.0),
            behavior,
        )
    }

    fn node() -> SceneObject {
        solid(Behavior::CircuitNode(CircuitNode {
            original_pos: Vec3::ZERO,
            float: FloatMotion {
                speed: 0.1,
                phase: 0.0,
                amount: 1.0,
            },
            pulse: 0.0,
            base_scale: 1.0,
            base_color: Color::WHITE,
            index: usize::MAX,
            connections: Vec::new(),
            hovered: false,
        }))
    }

    #[test]
    fn nodes_are_indexed_in_insertion_order() {
        let mut pool = SceneObjectPool::new();
        pool.add(node());
        pool.add(solid(Behavior::CircuitRing { parent: 0 }));
        pool.add(node());

        assert_eq!(pool.node_count(), 2);
        assert_eq!(pool.node(0).map(|n| n.index), Some(0));
        assert_eq!(pool.node(1).map(|n| n.index), Some(1));
        assert!(pool.node(2).is_none());
    }

    #[test]
    fn singletons_replace_rather_than_accumulate() {
        let mut pool = SceneObjectPool::new();
        assert_eq!(pool.add(solid(Behavior::StripSurface)), ObjectKey::Strip);
        assert_eq!(pool.add(solid(Behavior::StripSurface)), ObjectKey::Strip);
        pool.add(solid(Behavior::ParticleCloud));

        assert_eq!(pool.len(), 2);
        let tags: Vec<_> = pool.all().map(|(_, o)| o.tag()).collect();
        assert_eq!(tags, vec![BehaviorTag::StripSurface, BehaviorTag::ParticleCloud]);
    }

    #[test]
    fn clear_releases_everything_once() {
        let mut pool = SceneObjectPool::new();
        pool.add(solid(Behavior::StripSurface));
        pool.add(solid(Behavior::ParticleCloud));
        for _ in 0..3 {
            pool.add(node());
        }
        pool.add(solid(Behavior::CircuitRing { parent: 0 }));

        assert_eq!(pool.clear(), 6);
        assert_eq!(pool.all().count(), 0);
        assert!(pool.nodes().is_empty());
        assert!(pool.strip().is_none() && pool.particles().is_none());
        assert_eq!(pool.generation(), 1);

        assert_eq!(pool.clear(), 0);
        assert_eq!(pool.generation(), 1);
    }

    #[test]
    fn keys_resolve_to_the_added_object() {
        let mut pool = SceneObjectPool::new();
        pool.add(node());
        let key = pool.add(solid(Behavior::CircuitRing { parent: 0 }));

        let ring = pool.get(key).map(|o| o.tag());
        assert_eq!(ring, Some(BehaviorTag::CircuitRing));
        assert!(pool.get(ObjectKey::Strip).is_none());
    }
}
