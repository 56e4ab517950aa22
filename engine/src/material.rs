use palette::Srgba;

/// Material shared by all bone segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub albedo_factor: Srgba,
}

impl Material {
    pub fn color(name: impl Into<String>, albedo_factor: Srgba) -> Self {
        Material {
            name: name.into(),
            albedo_factor,
        }
    }
}
