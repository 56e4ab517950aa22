use crate::body::JointType;

/// Skeleton connectivity.
/// Each joint is connected by a bone to its parent joint.
pub struct BoneMap;

impl BoneMap {
    /// Returns joint that bone from `joint` is drawn to.
    /// `None` for terminal joints.
    pub fn parent_of(joint: JointType) -> Option<JointType> {
        use JointType::*;

        let parent = match joint {
            FootLeft => AnkleLeft,
            AnkleLeft => KneeLeft,
            KneeLeft => HipLeft,
            HipLeft => SpineBase,

            FootRight => AnkleRight,
            AnkleRight => KneeRight,
            KneeRight => HipRight,
            HipRight => SpineBase,

            HandTipLeft => HandLeft,
            ThumbLeft => HandLeft,
            HandLeft => WristLeft,
            WristLeft => ElbowLeft,
            ElbowLeft => ShoulderLeft,
            ShoulderLeft => SpineShoulder,

            HandTipRight => HandRight,
            ThumbRight => HandRight,
            HandRight => WristRight,
            WristRight => ElbowRight,
            ElbowRight => ShoulderRight,
            ShoulderRight => SpineShoulder,

            SpineBase => SpineMid,
            SpineMid => SpineShoulder,
            SpineShoulder => Neck,
            Neck => Head,

            Head => return None,
        };

        Some(parent)
    }

    /// All `(child, parent)` pairs in joint iteration order.
    pub fn bones() -> impl Iterator<Item = (JointType, JointType)> {
        JointType::ALL
            .into_iter()
            .filter_map(|jt| Some((jt, BoneMap::parent_of(jt)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_terminal() {
        assert_eq!(BoneMap::parent_of(JointType::Head), None);
        assert_eq!(BoneMap::bones().count(), JointType::COUNT - 1);
    }

    #[test]
    fn every_chain_ends_at_head() {
        for jt in JointType::ALL {
            let mut current = jt;
            let mut steps = 0;
            while let Some(parent) = BoneMap::parent_of(current) {
                current = parent;
                steps += 1;
                assert!(steps <= JointType::COUNT, "cycle from {}", jt);
            }
            assert_eq!(current, JointType::Head);
        }
    }

    #[test]
    fn limbs_attach_to_spine() {
        assert_eq!(
            BoneMap::parent_of(JointType::HipLeft),
            Some(JointType::SpineBase)
        );
        assert_eq!(
            BoneMap::parent_of(JointType::ShoulderRight),
            Some(JointType::SpineShoulder)
        );
        assert_eq!(
            BoneMap::parent_of(JointType::ThumbLeft),
            Some(JointType::HandLeft)
        );
    }
}
