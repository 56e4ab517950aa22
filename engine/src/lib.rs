//! Synchronizes tracked skeletal bodies from a sensor feed
//! with a pool of bone entities in a [`hecs::World`].

pub mod body;
pub mod bone;
pub mod clocks;
pub mod color;
pub mod config;
pub mod engine;
pub mod material;
pub mod pool;
pub mod resources;
pub mod scene;
pub mod segment;
pub mod sensor;
pub mod sync;
pub mod transform;

pub use self::{
    body::{Body, BodyError, BodyFrame, Joint, JointType, TrackingId, TrackingState},
    bone::BoneMap,
    clocks::{ClockIndex, Clocks},
    color::color_for,
    config::{Config, SkeletonConfig},
    engine::{Engine, System, SystemContext},
    material::Material,
    pool::{BodyEntity, BodyPool, BodyRoot, JointNode},
    resources::Resources,
    scene::{Global3, Local3, SceneSystem},
    segment::BoneSegment,
    sensor::{BodySource, ChannelSource},
    sync::{find_anchor, Anchor, FrameSynchronizer, HandPositions},
    transform::JointTransformer,
};
