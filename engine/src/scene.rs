use {
    crate::engine::{System, SystemContext},
    hecs::{Entity, World},
    nalgebra as na,
};

/// Upper bound on hierarchy depth.
/// Deeper chains are treated as broken and despawned.
const MAX_DEPTH: usize = 32;

/// Transform relative to parent entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Local3 {
    pub parent: Entity,
    pub iso: na::Isometry3<f32>,
    pub scale: na::Vector3<f32>,
}

impl Local3 {
    pub fn identity(parent: Entity) -> Self {
        Local3 {
            parent,
            iso: na::Isometry3::identity(),
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(parent: Entity, tr: na::Translation3<f32>) -> Self {
        Local3 {
            parent,
            iso: na::Isometry3::from_parts(tr, na::UnitQuaternion::identity()),
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = na::Vector3::new(scale, scale, scale);
        self
    }

    pub fn set_translation(&mut self, position: na::Point3<f32>) {
        self.iso.translation = na::Translation3::from(position.coords);
    }
}

/// World-space transform.
/// Roots carry only this, children get it recomputed by [`SceneSystem`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Global3 {
    pub iso: na::Isometry3<f32>,
    pub scale: na::Vector3<f32>,
}

impl Global3 {
    pub fn identity() -> Self {
        Global3 {
            iso: na::Isometry3::identity(),
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_iso(iso: na::Isometry3<f32>) -> Self {
        Global3 {
            iso,
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(position: na::Point3<f32>) -> Self {
        Global3::from_iso(na::Isometry3::from_parts(
            na::Translation3::from(position.coords),
            na::UnitQuaternion::identity(),
        ))
    }

    pub fn position(&self) -> na::Point3<f32> {
        na::Point3::from(self.iso.translation.vector)
    }

    pub fn append_local(&self, local: &Local3) -> Self {
        let translation = self.iso
            * na::Point3::from(
                self.scale.component_mul(&local.iso.translation.vector),
            );

        Global3 {
            iso: na::Isometry3::from_parts(
                na::Translation3::from(translation.coords),
                self.iso.rotation * local.iso.rotation,
            ),
            scale: self.scale.component_mul(&local.scale),
        }
    }
}

/// Recomputes [`Global3`] of every entity with [`Local3`].
/// Entities whose parent is gone are despawned.
pub struct SceneSystem;

impl System for SceneSystem {
    fn name(&self) -> &str {
        "Scene"
    }

    fn run(&mut self, ctx: SystemContext<'_>) {
        let mut updated = Vec::new();
        let mut despawn = Vec::new();

        for (entity, local) in ctx.world.query::<&Local3>().iter() {
            match parent_global(ctx.world, local.parent) {
                Some(parent) => updated.push((entity, parent.append_local(local))),
                None => despawn.push(entity),
            }
        }

        for (entity, global) in updated {
            let _ = ctx.world.insert_one(entity, global);
        }

        // Despawn entities whose parents are despawned.
        for entity in despawn {
            tracing::warn!(
                "Entity's ({:?}) parent is not in scene and shall be despawned",
                entity
            );
            let _ = ctx.world.despawn(entity);
        }
    }
}

fn parent_global(world: &World, parent: Entity) -> Option<Global3> {
    let mut chain = Vec::new();
    let mut current = parent;

    loop {
        match world.get::<&Local3>(current) {
            Ok(local) => {
                if chain.len() == MAX_DEPTH {
                    return None;
                }
                chain.push(*local);
                current = local.parent;
            }
            Err(_) => {
                let root = *world.get::<&Global3>(current).ok()?;
                return Some(
                    chain
                        .iter()
                        .rev()
                        .fold(root, |global, local| global.append_local(local)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{clocks::Clocks, engine::Engine},
    };

    #[test]
    fn child_follows_root() {
        let mut engine = Engine::new();
        engine.add_system(SceneSystem);

        let root = engine
            .world
            .spawn((Global3::from_position(na::Point3::new(1.0, 0.0, 0.0)),));
        let child = engine.world.spawn((
            Local3::from_translation(root, na::Translation3::new(0.0, 2.0, 0.0)),
            Global3::identity(),
        ));
        let grandchild = engine.world.spawn((
            Local3::from_translation(child, na::Translation3::new(0.0, 0.0, 3.0))
                .with_uniform_scale(0.5),
            Global3::identity(),
        ));

        engine.advance(Clocks::new().step());

        let global = *engine.world.get::<&Global3>(grandchild).unwrap();
        assert_eq!(global.position(), na::Point3::new(1.0, 2.0, 3.0));
        assert_eq!(global.scale, na::Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn orphans_are_despawned() {
        let mut engine = Engine::new();
        engine.add_system(SceneSystem);

        let root = engine.world.spawn((Global3::identity(),));
        let child = engine
            .world
            .spawn((Local3::identity(root), Global3::identity()));

        engine.world.despawn(root).unwrap();
        engine.advance(Clocks::new().step());

        assert!(!engine.world.contains(child));
    }
}
