use {
    crate::{
        body::{Body, JointType, TrackingId},
        bone::BoneMap,
        color::color_for,
        config::SkeletonConfig,
        engine::{System, SystemContext},
        pool::{BodyEntity, BodyPool},
        resources::Resources,
        scene::{Global3, Local3},
        segment::BoneSegment,
        sensor::BodySource,
        transform::JointTransformer,
    },
    hecs::{Entity, World},
    nalgebra as na,
    std::collections::HashSet,
};

/// Marker of the scene point skeletons are offset to.
/// The scaled sensor-space head maps onto it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Anchor;

/// Returns first entity marked with [`Anchor`].
pub fn find_anchor(world: &World) -> Option<Entity> {
    world
        .query::<&Anchor>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

/// Last render-space positions of the hands.
/// Overwritten every tick the hand joint is processed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPositions {
    pub right: na::Point3<f32>,
    pub left: na::Point3<f32>,
}

impl Default for HandPositions {
    fn default() -> Self {
        HandPositions {
            right: na::Point3::origin(),
            left: na::Point3::origin(),
        }
    }
}

/// Keeps body entities in sync with the sensor.
///
/// Each tick it fetches a frame, despawns bodies that are no longer
/// tracked, spawns new ones and updates every bone segment.
/// A tick without a frame leaves the world untouched.
pub struct FrameSynchronizer<S> {
    source: S,
    pool: BodyPool,
    transformer: JointTransformer,
    anchor: Option<Entity>,
}

impl<S> FrameSynchronizer<S>
where
    S: BodySource,
{
    pub fn new(source: S, pool: BodyPool, transformer: JointTransformer) -> Self {
        FrameSynchronizer {
            source,
            pool,
            transformer,
            anchor: None,
        }
    }

    /// Builds synchronizer from config, using anchor found in `world`.
    pub fn from_config(source: S, config: &SkeletonConfig, world: &World) -> Self {
        let anchor = find_anchor(world);
        if anchor.is_none() {
            tracing::warn!("No anchor in scene, skeletons are not offset");
        }

        FrameSynchronizer::new(source, BodyPool::from_config(config), config.transformer())
            .with_anchor(anchor)
    }

    pub fn with_anchor(mut self, anchor: Option<Entity>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn pool(&self) -> &BodyPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut BodyPool {
        &mut self.pool
    }

    /// Runs one synchronization pass.
    /// Returns `false` if the source had no frame.
    pub fn tick(&mut self, world: &mut World, resources: &mut Resources) -> bool {
        let frame = match self.source.fetch() {
            Some(frame) => frame,
            None => {
                tracing::trace!("No body frame, tick skipped");
                return false;
            }
        };

        let live: HashSet<TrackingId> = frame.tracked_ids().collect();
        self.pool.reconcile(world, &live);

        let anchor = self.anchor_position(world);
        let hands = resources.get_or_default::<HandPositions>();

        for body in frame.tracked() {
            let entity = *self.pool.get_or_create(world, body.tracking_id);
            let offset = self.transformer.anchor_offset(body, anchor);
            refresh_body(world, &self.transformer, body, &entity, offset, hands);
        }

        tracing::trace!("{} bodies synchronized", live.len());
        true
    }

    fn anchor_position(&self, world: &World) -> Option<na::Point3<f32>> {
        let anchor = self.anchor?;
        match world.get::<&Global3>(anchor) {
            Ok(global) => Some(global.position()),
            Err(err) => {
                tracing::debug!("Anchor {:?} unavailable: {}", anchor, err);
                None
            }
        }
    }
}

impl<S> System for FrameSynchronizer<S>
where
    S: BodySource,
{
    fn name(&self) -> &str {
        "FrameSynchronizer"
    }

    fn run(&mut self, ctx: SystemContext<'_>) {
        self.tick(ctx.world, ctx.resources);
    }
}

fn refresh_body(
    world: &mut World,
    transformer: &JointTransformer,
    body: &Body,
    entity: &BodyEntity,
    offset: na::Vector3<f32>,
    hands: &mut HandPositions,
) {
    let spine_base = body.joint(JointType::SpineBase);

    for jt in JointType::ALL {
        // Leg joints are left as spawned.
        if jt.is_leg() {
            continue;
        }

        let joint = body.joint(jt);
        let origin = transformer.to_render_position(joint, spine_base, offset);

        match jt {
            JointType::HandRight => hands.right = origin,
            JointType::HandLeft => hands.left = origin,
            _ => {}
        }

        let (local, segment) = match world
            .query_one_mut::<(&mut Local3, &mut BoneSegment)>(entity.joint(jt))
        {
            Ok(components) => components,
            Err(err) => {
                debug_assert!(false, "{} of {} is missing: {}", jt, body.tracking_id, err);
                tracing::error!("{} of {} is missing: {}", jt, body.tracking_id, err);
                continue;
            }
        };

        local.set_translation(transformer.mirrored(joint, spine_base));

        match BoneMap::parent_of(jt) {
            Some(parent) => {
                let target = body.joint(parent);
                segment.set(
                    origin,
                    transformer.to_render_position(target, spine_base, offset),
                    color_for(joint.tracking_state),
                    color_for(target.tracking_state),
                );
            }
            None => segment.disable(),
        }
    }
}
