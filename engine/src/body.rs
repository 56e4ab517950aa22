use {nalgebra as na, std::fmt};

/// Kind of skeletal joint reported by the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointType {
    SpineBase,
    SpineMid,
    Neck,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    SpineShoulder,
    HandTipLeft,
    ThumbLeft,
    HandTipRight,
    ThumbRight,
}

impl JointType {
    pub const COUNT: usize = 25;

    /// Every joint type, from `SpineBase` to `ThumbRight`.
    /// Per-body iteration always walks this sequence.
    pub const ALL: [JointType; JointType::COUNT] = [
        JointType::SpineBase,
        JointType::SpineMid,
        JointType::Neck,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
        JointType::SpineShoulder,
        JointType::HandTipLeft,
        JointType::ThumbLeft,
        JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    /// Position of this joint type in [`JointType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Hip, knee, ankle and foot joints of both legs.
    ///
    /// The synchronizer does not walk these joints on its own.
    pub fn is_leg(self) -> bool {
        matches!(
            self,
            JointType::HipLeft
                | JointType::KneeLeft
                | JointType::AnkleLeft
                | JointType::FootLeft
                | JointType::HipRight
                | JointType::KneeRight
                | JointType::AnkleRight
                | JointType::FootRight
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            JointType::SpineBase => "SpineBase",
            JointType::SpineMid => "SpineMid",
            JointType::Neck => "Neck",
            JointType::Head => "Head",
            JointType::ShoulderLeft => "ShoulderLeft",
            JointType::ElbowLeft => "ElbowLeft",
            JointType::WristLeft => "WristLeft",
            JointType::HandLeft => "HandLeft",
            JointType::ShoulderRight => "ShoulderRight",
            JointType::ElbowRight => "ElbowRight",
            JointType::WristRight => "WristRight",
            JointType::HandRight => "HandRight",
            JointType::HipLeft => "HipLeft",
            JointType::KneeLeft => "KneeLeft",
            JointType::AnkleLeft => "AnkleLeft",
            JointType::FootLeft => "FootLeft",
            JointType::HipRight => "HipRight",
            JointType::KneeRight => "KneeRight",
            JointType::AnkleRight => "AnkleRight",
            JointType::FootRight => "FootRight",
            JointType::SpineShoulder => "SpineShoulder",
            JointType::HandTipLeft => "HandTipLeft",
            JointType::ThumbLeft => "ThumbLeft",
            JointType::HandTipRight => "HandTipRight",
            JointType::ThumbRight => "ThumbRight",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensor confidence for a single joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingState {
    NotTracked,
    Inferred,
    Tracked,
}

/// One joint sample of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub joint_type: JointType,

    /// Position in sensor space, meters.
    pub position: na::Point3<f32>,
    pub tracking_state: TrackingState,
}

impl Joint {
    pub fn new(
        joint_type: JointType,
        position: na::Point3<f32>,
        tracking_state: TrackingState,
    ) -> Self {
        Joint {
            joint_type,
            position,
            tracking_state,
        }
    }

    pub fn tracked(joint_type: JointType, position: na::Point3<f32>) -> Self {
        Joint::new(joint_type, position, TrackingState::Tracked)
    }
}

/// Identifier the sensor assigns to a body for as long as it stays tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackingId(pub u64);

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body:{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("Joint '{0}' is missing from body samples")]
    MissingJoint(JointType),
}

/// Snapshot of a single body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub tracking_id: TrackingId,
    pub is_tracked: bool,
    joints: [Joint; JointType::COUNT],
}

impl Body {
    /// Builds a body from joint samples.
    ///
    /// Every joint type must be present. When a joint type appears more
    /// than once the last sample is kept.
    pub fn from_joints<I>(
        tracking_id: TrackingId,
        is_tracked: bool,
        joints: I,
    ) -> Result<Self, BodyError>
    where
        I: IntoIterator<Item = Joint>,
    {
        let mut slots: [Option<Joint>; JointType::COUNT] =
            [None; JointType::COUNT];

        for joint in joints {
            slots[joint.joint_type.index()] = Some(joint);
        }

        let mut missing = None;
        let joints = JointType::ALL.map(|jt| match slots[jt.index()] {
            Some(joint) => joint,
            None => {
                missing.get_or_insert(jt);
                Joint::new(jt, na::Point3::origin(), TrackingState::NotTracked)
            }
        });

        match missing {
            Some(jt) => Err(BodyError::MissingJoint(jt)),
            None => Ok(Body {
                tracking_id,
                is_tracked,
                joints,
            }),
        }
    }

    /// Body with every joint tracked at the sensor origin.
    pub fn at_origin(tracking_id: TrackingId, is_tracked: bool) -> Self {
        Body {
            tracking_id,
            is_tracked,
            joints: JointType::ALL
                .map(|jt| Joint::tracked(jt, na::Point3::origin())),
        }
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type.index()]
    }

    pub fn joint_mut(&mut self, joint_type: JointType) -> &mut Joint {
        &mut self.joints[joint_type.index()]
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }
}

/// Sensor snapshot for one tick.
/// `None` slots are bodies the sensor does not report this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyFrame {
    pub bodies: Vec<Option<Body>>,
}

impl BodyFrame {
    pub fn new(bodies: Vec<Option<Body>>) -> Self {
        BodyFrame { bodies }
    }

    /// Tracked bodies in frame order.
    pub fn tracked(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().flatten().filter(|body| body.is_tracked)
    }

    pub fn tracked_ids(&self) -> impl Iterator<Item = TrackingId> + '_ {
        self.tracked().map(|body| body.tracking_id)
    }
}

impl FromIterator<Body> for BodyFrame {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        BodyFrame {
            bodies: iter.into_iter().map(Some).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_follows_declaration_order() {
        for (index, jt) in JointType::ALL.iter().enumerate() {
            assert_eq!(jt.index(), index);
        }
        assert_eq!(JointType::ALL[0], JointType::SpineBase);
        assert_eq!(JointType::ALL[JointType::COUNT - 1], JointType::ThumbRight);
    }

    #[test]
    fn leg_predicate_matches_hip_to_foot_range() {
        for jt in JointType::ALL {
            let in_range = jt >= JointType::HipLeft && jt <= JointType::FootRight;
            assert_eq!(jt.is_leg(), in_range, "{}", jt);
        }
    }

    #[test]
    fn missing_joint_is_reported() {
        let joints = JointType::ALL
            .iter()
            .copied()
            .filter(|&jt| jt != JointType::Neck)
            .map(|jt| Joint::tracked(jt, na::Point3::origin()));

        let err = Body::from_joints(TrackingId(1), true, joints).unwrap_err();
        assert_eq!(err, BodyError::MissingJoint(JointType::Neck));
    }

    #[test]
    fn duplicate_sample_keeps_last() {
        let joints = JointType::ALL
            .iter()
            .map(|&jt| Joint::tracked(jt, na::Point3::origin()))
            .chain(Some(Joint::new(
                JointType::Head,
                na::Point3::new(0.0, 1.0, 0.0),
                TrackingState::Inferred,
            )));

        let body = Body::from_joints(TrackingId(1), true, joints).unwrap();
        let head = body.joint(JointType::Head);
        assert_eq!(head.position, na::Point3::new(0.0, 1.0, 0.0));
        assert_eq!(head.tracking_state, TrackingState::Inferred);
    }

    #[test]
    fn tracked_skips_null_and_untracked() {
        let frame = BodyFrame::new(vec![
            None,
            Some(Body::at_origin(TrackingId(3), false)),
            Some(Body::at_origin(TrackingId(9), true)),
            None,
            Some(Body::at_origin(TrackingId(4), true)),
        ]);

        let ids: Vec<_> = frame.tracked_ids().collect();
        assert_eq!(ids, [TrackingId(9), TrackingId(4)]);
    }
}
