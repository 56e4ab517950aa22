use {
    crate::{color::BLACK, material::Material},
    nalgebra as na,
    palette::Srgba,
    std::sync::Arc,
};

/// Line segment drawn between two points, with a color at each end.
#[derive(Clone, Debug)]
pub struct BoneSegment {
    pub width: f32,
    pub material: Arc<Material>,
    pub positions: [na::Point3<f32>; 2],
    pub colors: [Srgba; 2],
    pub enabled: bool,
}

impl BoneSegment {
    /// Disabled segment with both ends at the origin.
    pub fn new(width: f32, material: Arc<Material>) -> Self {
        BoneSegment {
            width,
            material,
            positions: [na::Point3::origin(); 2],
            colors: [BLACK; 2],
            enabled: false,
        }
    }

    /// Sets both endpoints and their colors and enables the segment.
    pub fn set(
        &mut self,
        origin: na::Point3<f32>,
        target: na::Point3<f32>,
        origin_color: Srgba,
        target_color: Srgba,
    ) {
        self.positions = [origin, target];
        self.colors = [origin_color, target_color];
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }
}
