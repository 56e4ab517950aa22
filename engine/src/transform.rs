use {
    crate::body::{Body, Joint, JointType},
    nalgebra as na,
};

/// Maps sensor-space joint samples into render space.
///
/// Positions are scaled uniformly, then mirrored along X about the body's
/// own spine base, so the pose faces the viewer the way a mirror would.
/// Y and Z are not mirrored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointTransformer {
    pub scale: f32,
}

impl Default for JointTransformer {
    fn default() -> Self {
        JointTransformer { scale: 2.0 }
    }
}

impl JointTransformer {
    pub fn new(scale: f32) -> Self {
        JointTransformer { scale }
    }

    /// Sensor position multiplied by the scale factor.
    pub fn scaled(&self, joint: &Joint) -> na::Point3<f32> {
        joint.position * self.scale
    }

    /// Scaled and mirrored position, without anchor offset.
    pub fn mirrored(&self, joint: &Joint, spine_base: &Joint) -> na::Point3<f32> {
        let scaled = self.scaled(joint);
        let spine_base = self.scaled(spine_base);
        na::Point3::new(2.0 * spine_base.x - scaled.x, scaled.y, scaled.z)
    }

    pub fn to_render_position(
        &self,
        joint: &Joint,
        spine_base: &Joint,
        anchor_offset: na::Vector3<f32>,
    ) -> na::Point3<f32> {
        self.mirrored(joint, spine_base) + anchor_offset
    }

    /// Offset from the body's scaled, unmirrored head to the anchor.
    /// Zero when there is no anchor.
    pub fn anchor_offset(
        &self,
        body: &Body,
        anchor: Option<na::Point3<f32>>,
    ) -> na::Vector3<f32> {
        match anchor {
            Some(anchor) => anchor - self.scaled(body.joint(JointType::Head)),
            None => na::Vector3::zeros(),
        }
    }
}
