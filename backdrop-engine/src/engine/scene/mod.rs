//! Scene object model and the pool that owns it.
//!
//! Objects are plain data: a geometry and material description, a transform
//! and exactly one [`Behavior`](object::Behavior). The render bridge mirrors
//! them into entities; nothing here touches the ECS.

/// Object, behavior, geometry and material descriptors.
pub mod object;

/// Arena-backed owner of every live object with typed indices.
pub mod pool;

pub use object::{
    Behavior, BehaviorTag, ConnectionIndex, HitVolume, NodeIndex, ObjectId, ObjectKey, SceneObject,
};
pub use pool::SceneObjectPool;
