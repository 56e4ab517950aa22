use {crate::body::TrackingState, palette::Srgba};

pub const GREEN: Srgba = Srgba::new(0.0, 1.0, 0.0, 1.0);
pub const RED: Srgba = Srgba::new(1.0, 0.0, 0.0, 1.0);
pub const BLACK: Srgba = Srgba::new(0.0, 0.0, 0.0, 1.0);

/// Color of a bone endpoint for joint with given tracking state.
pub fn color_for(state: TrackingState) -> Srgba {
    match state {
        TrackingState::Tracked => GREEN,
        TrackingState::Inferred => RED,
        TrackingState::NotTracked => BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_map_to_colors() {
        assert_eq!(color_for(TrackingState::Tracked), GREEN);
        assert_eq!(color_for(TrackingState::Inferred), RED);
        assert_eq!(color_for(TrackingState::NotTracked), BLACK);
    }
}
