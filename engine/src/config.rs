use {
    crate::{material::Material, transform::JointTransformer},
    color_eyre::Report,
    eyre::WrapErr,
    palette::Srgba,
    serde::de::DeserializeOwned,
    std::path::{Path, PathBuf},
};

/// Environment variable that overrides config file path.
pub const CONFIG_PATH_VAR: &str = "BODYVIEW_CONFIG_PATH";

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skeleton: SkeletonConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct SkeletonConfig {
    /// Sensor to render space scale factor.
    #[serde(default = "default_position_scale")]
    pub position_scale: f32,

    #[serde(default = "default_bone_width")]
    pub bone_width: f32,

    /// Uniform scale of joint entities.
    #[serde(default = "default_joint_scale")]
    pub joint_scale: f32,

    #[serde(default)]
    pub material: MaterialConfig,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        SkeletonConfig {
            position_scale: default_position_scale(),
            bone_width: default_bone_width(),
            joint_scale: default_joint_scale(),
            material: MaterialConfig::default(),
        }
    }
}

impl SkeletonConfig {
    pub fn transformer(&self) -> JointTransformer {
        JointTransformer::new(self.position_scale)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_material_name")]
    pub name: String,

    #[serde(default = "default_material_color", with = "serde_color")]
    pub color: Srgba,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        MaterialConfig {
            name: default_material_name(),
            color: default_material_color(),
        }
    }
}

impl MaterialConfig {
    pub fn to_material(&self) -> Material {
        Material::color(self.name.clone(), self.color)
    }
}

fn default_position_scale() -> f32 {
    2.0
}

fn default_bone_width() -> f32 {
    0.05
}

fn default_joint_scale() -> f32 {
    0.3
}

fn default_material_name() -> String {
    "Bone".to_owned()
}

fn default_material_color() -> Srgba {
    Srgba::new(1.0, 1.0, 1.0, 1.0)
}

impl Config {
    pub fn load_default() -> Result<Self, Report> {
        Self::load(&config_path())
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Report> {
        load_ron(path)
    }
}

/// Config file path.
/// Taken from [`CONFIG_PATH_VAR`] when set, `./cfg.ron` otherwise.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./cfg.ron"))
}

pub fn load_ron<T>(path: &Path) -> Result<T, Report>
where
    T: DeserializeOwned,
{
    let file = std::fs::File::open(path)
        .wrap_err_with(|| format!("Failed to open '{}'", path.display()))?;

    let value = ron::de::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse '{}'", path.display()))?;

    Ok(value)
}

mod serde_color {
    use {palette::Srgba, serde::de::*, std::fmt};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Srgba, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Srgba;

            fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt.write_str("Color HEX code or array of 3 or 4 elements")
            }

            fn visit_str<E>(self, s: &str) -> Result<Srgba, E>
            where
                E: Error,
            {
                if s.is_ascii() && (s.len() == 7 || s.len() == 9) && s.starts_with('#') {
                    let channel = |i: usize| {
                        u8::from_str_radix(&s[i..i + 2], 16)
                            .map(|c| c as f32 / 255.0)
                    };

                    let alpha = if s.len() == 9 { channel(7) } else { Ok(1.0) };

                    if let (Ok(r), Ok(g), Ok(b), Ok(a)) =
                        (channel(1), channel(3), channel(5), alpha)
                    {
                        return Ok(Srgba::new(r, g, b, a));
                    }
                }

                Err(E::invalid_value(Unexpected::Str(s), &self))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Srgba, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let r = seq
                    .next_element()?
                    .ok_or_else(|| Error::invalid_length(0, &self))?;
                let g = seq
                    .next_element()?
                    .ok_or_else(|| Error::invalid_length(1, &self))?;
                let b = seq
                    .next_element()?
                    .ok_or_else(|| Error::invalid_length(2, &self))?;
                let a = seq.next_element()?.unwrap_or(1.0);

                Ok(Srgba::new(r, g, b, a))
            }
        }
        deserializer.deserialize_any(ColorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = ron::from_str("()").unwrap();
        assert_eq!(config.skeleton.position_scale, 2.0);
        assert_eq!(config.skeleton.bone_width, 0.05);
        assert_eq!(config.skeleton.joint_scale, 0.3);
        assert_eq!(config.skeleton.material.name, "Bone");
    }

    #[test]
    fn colors_parse_from_hex_and_arrays() {
        let config: Config = ron::from_str(
            r##"(skeleton: (bone_width: 0.1, material: (name: "Chalk", color: "#FF000080")))"##,
        )
        .unwrap();
        let color = config.skeleton.material.color;
        assert_eq!(config.skeleton.bone_width, 0.1);
        assert_eq!(config.skeleton.material.name, "Chalk");
        assert_eq!((color.red, color.green, color.blue), (1.0, 0.0, 0.0));
        assert!((color.alpha - 128.0 / 255.0).abs() < 1e-6);

        let config: Config =
            ron::from_str("(skeleton: (material: (color: [0.0, 0.5, 1.0])))")
                .unwrap();
        let color = config.skeleton.material.color;
        assert_eq!(
            (color.red, color.green, color.blue, color.alpha),
            (0.0, 0.5, 1.0, 1.0)
        );
    }

    #[test]
    fn malformed_color_is_rejected() {
        let result: Result<Config, _> =
            ron::from_str(r##"(skeleton: (material: (color: "#GG0000")))"##);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("./does/not/exist.ron")).unwrap_err();
        assert!(format!("{:?}", err).contains("exist.ron"));
    }
}
