use {
    bodyview::config::{config_path, load_ron},
    color_eyre::Report,
    std::time::Duration,
};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: bodyview::config::Config,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Loads config from the default path.
    /// Falls back to defaults when there is no config file.
    pub fn load_default() -> Result<Self, Report> {
        let path = config_path();
        if !path.exists() {
            tracing::warn!("No config at '{}', using defaults", path.display());
            return Ok(Config::default());
        }
        load_ron(&path)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct DemoConfig {
    /// Number of ticks to run.
    #[serde(default = "default_frames")]
    pub frames: u64,

    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,

    /// Number of simultaneously visible synthetic bodies.
    #[serde(default = "default_bodies")]
    pub bodies: usize,

    /// Frames a synthetic body stays tracked before it is replaced.
    #[serde(default = "default_body_lifetime")]
    pub body_lifetime: u64,

    /// Probability of a joint being reported as inferred.
    #[serde(default = "default_inferred_chance")]
    pub inferred_chance: f64,

    #[serde(default = "default_anchor")]
    pub anchor: [f32; 3],
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            frames: default_frames(),
            frame_rate: default_frame_rate(),
            bodies: default_bodies(),
            body_lifetime: default_body_lifetime(),
            inferred_chance: default_inferred_chance(),
            anchor: default_anchor(),
        }
    }
}

impl DemoConfig {
    /// Frame rate, at least one frame per second.
    pub fn frame_rate(&self) -> f32 {
        if self.frame_rate.is_finite() {
            self.frame_rate.max(1.0)
        } else {
            default_frame_rate()
        }
    }

    /// Time between two frames.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.frame_rate())
    }
}

fn default_frames() -> u64 {
    300
}

fn default_frame_rate() -> f32 {
    30.0
}

fn default_bodies() -> usize {
    2
}

fn default_body_lifetime() -> u64 {
    90
}

fn default_inferred_chance() -> f64 {
    0.05
}

fn default_anchor() -> [f32; 3] {
    [0.0, 1.6, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_frame_rate_is_clamped() {
        for frame_rate in [0.0, -30.0, f32::NAN] {
            let config = DemoConfig {
                frame_rate,
                ..DemoConfig::default()
            };
            assert_eq!(config.frame_rate(), if frame_rate.is_nan() { 30.0 } else { 1.0 });
            assert!(config.period() <= Duration::from_secs(1));
        }
    }

    #[test]
    fn period_follows_frame_rate() {
        let config: DemoConfig = ron::from_str("(frame_rate: 50.0)").unwrap();
        assert_eq!(config.period(), Duration::from_secs_f32(1.0 / 50.0));
    }
}
