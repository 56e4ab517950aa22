use {
    crate::config::DemoConfig,
    bodyview::{Body, BodyError, BodyFrame, ChannelSource, Joint, JointType, TrackingId, TrackingState},
    nalgebra as na,
    rand::Rng as _,
    std::thread::{self, JoinHandle},
};

/// Distance between neighbouring bodies, meters.
const SPACING: f32 = 0.9;

/// Spawns a thread that emulates the sensor.
///
/// Bodies stand side by side and wave their right hand.
/// Every `body_lifetime` frames a body walks out for one frame
/// and comes back with a new tracking id.
pub fn spawn(config: DemoConfig) -> (ChannelSource, JoinHandle<()>) {
    let (sender, receiver) = flume::bounded(4);

    let handle = thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let period = config.period();
        let frame_rate = config.frame_rate();
        let lifetime = config.body_lifetime.max(2);
        let inferred_chance = config.inferred_chance.clamp(0.0, 1.0);

        for frame in 0.. {
            let t = frame as f32 / frame_rate;
            let bodies = (0..config.bodies)
                .map(|slot| {
                    // Stagger slots so bodies are not replaced all at once.
                    let age = frame + slot as u64 * lifetime / 2;
                    if age % lifetime == lifetime - 1 {
                        return None;
                    }

                    let id = TrackingId(((age / lifetime) << 8) | slot as u64);
                    let mut body = match pose(id, slot, t) {
                        Ok(body) => body,
                        Err(err) => {
                            tracing::error!("Failed to pose {}: {}", id, err);
                            return None;
                        }
                    };
                    for jt in JointType::ALL {
                        if rng.gen_bool(inferred_chance) {
                            body.joint_mut(jt).tracking_state = TrackingState::Inferred;
                        }
                    }
                    Some(body)
                })
                .collect();

            if sender.send(BodyFrame::new(bodies)).is_err() {
                tracing::debug!("Sensor stopped after {} frames", frame);
                break;
            }

            thread::sleep(period);
        }
    });

    (ChannelSource::new(receiver), handle)
}

fn pose(id: TrackingId, slot: usize, t: f32) -> Result<Body, BodyError> {
    let base = na::Vector3::new(slot as f32 * SPACING, 0.0, 2.0);
    let wave = (t * 4.0 + slot as f32).sin() * 0.2;

    let joints = JointType::ALL.iter().map(|&jt| {
        let [x, y, z] = rest_offset(jt);
        let lift = match jt {
            JointType::WristRight => wave * 0.5,
            JointType::HandRight | JointType::HandTipRight | JointType::ThumbRight => wave,
            _ => 0.0,
        };

        Joint::new(
            jt,
            na::Point3::new(x, y + lift, z) + base,
            TrackingState::Tracked,
        )
    });

    Body::from_joints(id, true, joints)
}

/// Standing pose relative to spine base, sensor space.
fn rest_offset(jt: JointType) -> [f32; 3] {
    match jt {
        JointType::SpineBase => [0.0, 0.0, 0.0],
        JointType::SpineMid => [0.0, 0.3, 0.0],
        JointType::SpineShoulder => [0.0, 0.55, 0.0],
        JointType::Neck => [0.0, 0.6, 0.0],
        JointType::Head => [0.0, 0.75, 0.0],

        JointType::ShoulderLeft => [-0.2, 0.55, 0.0],
        JointType::ElbowLeft => [-0.45, 0.55, 0.0],
        JointType::WristLeft => [-0.65, 0.55, 0.0],
        JointType::HandLeft => [-0.72, 0.55, 0.0],
        JointType::HandTipLeft => [-0.8, 0.55, 0.0],
        JointType::ThumbLeft => [-0.72, 0.6, -0.05],

        JointType::ShoulderRight => [0.2, 0.55, 0.0],
        JointType::ElbowRight => [0.45, 0.55, 0.0],
        JointType::WristRight => [0.65, 0.55, 0.0],
        JointType::HandRight => [0.72, 0.55, 0.0],
        JointType::HandTipRight => [0.8, 0.55, 0.0],
        JointType::ThumbRight => [0.72, 0.6, -0.05],

        JointType::HipLeft => [-0.1, -0.05, 0.0],
        JointType::KneeLeft => [-0.1, -0.45, 0.0],
        JointType::AnkleLeft => [-0.1, -0.85, 0.0],
        JointType::FootLeft => [-0.1, -0.9, -0.1],

        JointType::HipRight => [0.1, -0.05, 0.0],
        JointType::KneeRight => [0.1, -0.45, 0.0],
        JointType::AnkleRight => [0.1, -0.85, 0.0],
        JointType::FootRight => [0.1, -0.9, -0.1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_keeps_right_arm_waving() {
        let still = pose(TrackingId(1), 0, 0.0).unwrap();
        let raised = pose(TrackingId(1), 0, std::f32::consts::FRAC_PI_8).unwrap();

        let hand = |body: &Body| body.joint(JointType::HandRight).position;
        assert!(hand(&raised).y > hand(&still).y);
        assert_eq!(
            still.joint(JointType::Head).position,
            raised.joint(JointType::Head).position
        );
    }
}
