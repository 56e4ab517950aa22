use {
    crate::{
        body::{JointType, TrackingId},
        config::SkeletonConfig,
        material::Material,
        scene::{Global3, Local3},
        segment::BoneSegment,
    },
    hecs::{Entity, World},
    std::{
        collections::{hash_map::Entry, HashMap, HashSet},
        sync::Arc,
    },
};

/// Marker of a body's root entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyRoot {
    pub id: TrackingId,
}

/// Component of a joint entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointNode {
    pub body: TrackingId,
    pub joint: JointType,
}

/// Entities of one tracked body.
/// Root entity and one child per joint type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyEntity {
    root: Entity,
    joints: [Entity; JointType::COUNT],
}

impl BodyEntity {
    pub fn root(&self) -> Entity {
        self.root
    }

    pub fn joint(&self, joint_type: JointType) -> Entity {
        self.joints[joint_type.index()]
    }

    pub fn joints(&self) -> &[Entity] {
        &self.joints
    }
}

/// Owns entities of every tracked body, keyed by tracking id.
pub struct BodyPool {
    bodies: HashMap<TrackingId, BodyEntity>,
    material: Arc<Material>,
    bone_width: f32,
    joint_scale: f32,
}

impl BodyPool {
    pub fn new(material: Arc<Material>, bone_width: f32, joint_scale: f32) -> Self {
        BodyPool {
            bodies: HashMap::new(),
            material,
            bone_width,
            joint_scale,
        }
    }

    pub fn from_config(config: &SkeletonConfig) -> Self {
        BodyPool::new(
            Arc::new(config.material.to_material()),
            config.bone_width,
            config.joint_scale,
        )
    }

    /// Despawns bodies whose ids are not in `live`.
    pub fn reconcile(&mut self, world: &mut World, live: &HashSet<TrackingId>) {
        let known: Vec<TrackingId> = self.bodies.keys().copied().collect();

        for id in known {
            if live.contains(&id) {
                continue;
            }

            if let Some(body) = self.bodies.remove(&id) {
                tracing::info!("{} lost", id);
                despawn_body(world, &body);
            }
        }
    }

    /// Returns entities of the body, spawning them if the id is new.
    pub fn get_or_create(&mut self, world: &mut World, id: TrackingId) -> &BodyEntity {
        match self.bodies.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::info!("{} appeared", id);
                entry.insert(spawn_body(
                    world,
                    id,
                    &self.material,
                    self.bone_width,
                    self.joint_scale,
                ))
            }
        }
    }

    pub fn get(&self, id: TrackingId) -> Option<&BodyEntity> {
        self.bodies.get(&id)
    }

    pub fn contains(&self, id: TrackingId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TrackingId> + '_ {
        self.bodies.keys().copied()
    }

    /// Despawns every body.
    pub fn clear(&mut self, world: &mut World) {
        for (_, body) in self.bodies.drain() {
            despawn_body(world, &body);
        }
    }
}

fn spawn_body(
    world: &mut World,
    id: TrackingId,
    material: &Arc<Material>,
    bone_width: f32,
    joint_scale: f32,
) -> BodyEntity {
    let root = world.spawn((BodyRoot { id }, Global3::identity()));

    let joints = JointType::ALL.map(|joint| {
        world.spawn((
            JointNode { body: id, joint },
            Local3::identity(root).with_uniform_scale(joint_scale),
            Global3::identity(),
            BoneSegment::new(bone_width, material.clone()),
        ))
    });

    BodyEntity { root, joints }
}

fn despawn_body(world: &mut World, body: &BodyEntity) {
    for &joint in &body.joints {
        let _ = world.despawn(joint);
    }
    let _ = world.despawn(body.root);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> BodyPool {
        BodyPool::from_config(&SkeletonConfig::default())
    }

    #[test]
    fn existing_body_is_reused() {
        let mut world = World::new();
        let mut pool = pool();

        let first = *pool.get_or_create(&mut world, TrackingId(1));
        let second = *pool.get_or_create(&mut world, TrackingId(1));

        assert_eq!(first, second);
        assert_eq!(pool.len(), 1);
        assert_eq!(world.len() as usize, 1 + JointType::COUNT);
    }

    #[test]
    fn joints_are_distinct_children_of_root() {
        let mut world = World::new();
        let mut pool = pool();
        let body = *pool.get_or_create(&mut world, TrackingId(8));

        let unique: HashSet<Entity> = body.joints().iter().copied().collect();
        assert_eq!(unique.len(), JointType::COUNT);

        for jt in JointType::ALL {
            let entity = body.joint(jt);
            let node = *world.get::<&JointNode>(entity).unwrap();
            let local = *world.get::<&Local3>(entity).unwrap();
            let segment = world.get::<&BoneSegment>(entity).unwrap();

            assert_eq!(node, JointNode { body: TrackingId(8), joint: jt });
            assert_eq!(local.parent, body.root());
            assert_eq!(segment.width, 0.05);
            assert!(!segment.enabled);
        }
    }

    #[test]
    fn segments_share_material() {
        let mut world = World::new();
        let mut pool = pool();
        let a = *pool.get_or_create(&mut world, TrackingId(1));
        let b = *pool.get_or_create(&mut world, TrackingId(2));

        let left = world.get::<&BoneSegment>(a.joint(JointType::Head)).unwrap();
        let right = world.get::<&BoneSegment>(b.joint(JointType::Neck)).unwrap();
        assert!(Arc::ptr_eq(&left.material, &right.material));
    }

    #[test]
    fn reconcile_despawns_stale_bodies() {
        let mut world = World::new();
        let mut pool = pool();
        let stale = *pool.get_or_create(&mut world, TrackingId(1));
        pool.get_or_create(&mut world, TrackingId(2));

        let live: HashSet<_> = Some(TrackingId(2)).into_iter().collect();
        pool.reconcile(&mut world, &live);

        assert!(!pool.contains(TrackingId(1)));
        assert!(pool.contains(TrackingId(2)));
        assert!(!world.contains(stale.root()));
        assert!(stale.joints().iter().all(|&joint| !world.contains(joint)));
        assert_eq!(world.len() as usize, 1 + JointType::COUNT);
    }

    #[test]
    fn clear_despawns_everything() {
        let mut world = World::new();
        let mut pool = pool();
        pool.get_or_create(&mut world, TrackingId(1));
        pool.get_or_create(&mut world, TrackingId(2));

        pool.clear(&mut world);

        assert!(pool.is_empty());
        assert_eq!(world.len(), 0);
    }
}
