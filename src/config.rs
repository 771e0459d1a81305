//! Configuration loaded from a YAML file, with CLI overrides.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration:
//!
//! ```yaml
//! colors: 256
//! aggregation: mode        # mode | mean
//! reserve_transparent: false
//! key_bits: 6
//! seed_colors: ["#000000"]
//! output:
//!   format: apng           # apng | frames
//!   delay_ms: 100
//!   disposal: background   # none | background | previous
//!   loops: 0               # 0 = forever
//!   optimize: false
//! ```

use std::path::Path;

use median_cut::{
    Aggregation, Disposal, FrameTiming, MedianCutQuantizer, Rgba8, DEFAULT_DELAY_MS,
    DEFAULT_KEY_BITS, MAX_PALETTE_SIZE,
};
use serde::{Deserialize, Serialize};

use crate::error::FramepalError;

/// Environment variable naming a default config file.
pub const CONFIG_ENV: &str = "FRAMEPAL_CONFIG";

/// Quantization and output settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Palette capacity, transparent slot and seed colors included
    #[serde(default = "default_colors")]
    pub colors: usize,

    /// How buckets are reduced to palette colors
    #[serde(default)]
    pub aggregation: AggregationSetting,

    /// Reserve a transparent slot even when no pixel is transparent
    #[serde(default)]
    pub reserve_transparent: bool,

    /// Bits per channel kept in palette lookup cache keys
    #[serde(default = "default_key_bits")]
    pub key_bits: u8,

    /// Hex colors placed at the start of the palette
    #[serde(default)]
    pub seed_colors: Vec<String>,

    /// Output container settings
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_colors() -> usize {
    MAX_PALETTE_SIZE
}

fn default_key_bits() -> u8 {
    DEFAULT_KEY_BITS
}

/// Output container settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Display time per frame in milliseconds
    #[serde(default = "default_delay")]
    pub delay_ms: u32,

    #[serde(default)]
    pub disposal: DisposalSetting,

    /// Animation loop count (0 = forever)
    #[serde(default)]
    pub loops: u32,

    /// Re-compress written PNG files with oxipng (frame sequences only)
    #[serde(default)]
    pub optimize: bool,
}

fn default_delay() -> u32 {
    DEFAULT_DELAY_MS
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delay_ms: default_delay(),
            disposal: DisposalSetting::default(),
            loops: 0,
            optimize: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AggregationSetting {
    /// Most frequent color of each bucket
    #[default]
    Mode,
    /// Weighted average of each bucket
    Mean,
}

impl From<AggregationSetting> for Aggregation {
    fn from(setting: AggregationSetting) -> Self {
        match setting {
            AggregationSetting::Mode => Aggregation::Mode,
            AggregationSetting::Mean => Aggregation::Mean,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One animated PNG
    #[default]
    Apng,
    /// One indexed PNG per frame plus a JSON manifest
    Frames,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisposalSetting {
    None,
    #[default]
    Background,
    Previous,
}

impl From<DisposalSetting> for Disposal {
    fn from(setting: DisposalSetting) -> Self {
        match setting {
            DisposalSetting::None => Disposal::None,
            DisposalSetting::Background => Disposal::Background,
            DisposalSetting::Previous => Disposal::Previous,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub colors: Option<usize>,
    pub aggregation: Option<AggregationSetting>,
    pub reserve_transparent: bool,
    pub key_bits: Option<u8>,
    pub format: Option<OutputFormat>,
    pub delay_ms: Option<u32>,
    pub disposal: Option<DisposalSetting>,
    pub loops: Option<u32>,
    pub optimize: bool,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, FramepalError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            colors = config.colors,
            aggregation = ?config.aggregation,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load `path` if given, else the file named by `FRAMEPAL_CONFIG`, else
    /// use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FramepalError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::load(Path::new(&env_path)),
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate YAML content. Empty content yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, FramepalError> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| FramepalError::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command line values on top of this configuration.
    pub fn apply(&mut self, overrides: &ConfigOverrides) -> Result<(), FramepalError> {
        if let Some(colors) = overrides.colors {
            self.colors = colors;
        }
        if let Some(aggregation) = overrides.aggregation {
            self.aggregation = aggregation;
        }
        self.reserve_transparent |= overrides.reserve_transparent;
        if let Some(bits) = overrides.key_bits {
            self.key_bits = bits;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(delay) = overrides.delay_ms {
            self.output.delay_ms = delay;
        }
        if let Some(disposal) = overrides.disposal {
            self.output.disposal = disposal;
        }
        if let Some(loops) = overrides.loops {
            self.output.loops = loops;
        }
        self.output.optimize |= overrides.optimize;
        self.validate()
    }

    fn validate(&self) -> Result<(), FramepalError> {
        if !(1..=MAX_PALETTE_SIZE).contains(&self.colors) {
            return Err(FramepalError::Config(format!(
                "colors must be between 1 and {MAX_PALETTE_SIZE}, got {}",
                self.colors
            )));
        }
        if !(1..=8).contains(&self.key_bits) {
            return Err(FramepalError::Config(format!(
                "key_bits must be between 1 and 8, got {}",
                self.key_bits
            )));
        }
        if self.seed_colors.len() >= self.colors {
            return Err(FramepalError::Config(format!(
                "{} seed colors leave no room in a {}-color palette",
                self.seed_colors.len(),
                self.colors
            )));
        }
        Ok(())
    }

    /// Parse `seed_colors`.
    pub fn seed_colors(&self) -> Result<Vec<Rgba8>, FramepalError> {
        self.seed_colors
            .iter()
            .map(|value| {
                value.parse::<Rgba8>().map_err(|source| FramepalError::SeedColor {
                    value: value.clone(),
                    source,
                })
            })
            .collect()
    }

    /// A quantizer configured from these settings.
    pub fn quantizer(&self) -> Result<MedianCutQuantizer, FramepalError> {
        Ok(MedianCutQuantizer::new()
            .capacity(self.colors)
            .aggregation(self.aggregation.into())
            .reserve_transparent(self.reserve_transparent)
            .key_bits(self.key_bits)
            .seed_colors(self.seed_colors()?))
    }

    /// Timing applied to every frame.
    pub fn timing(&self) -> FrameTiming {
        FrameTiming::new(self.output.delay_ms, self.output.disposal.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            aggregation: AggregationSetting::default(),
            reserve_transparent: false,
            key_bits: default_key_bits(),
            seed_colors: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.colors, 256);
        assert_eq!(config.aggregation, AggregationSetting::Mode);
        assert_eq!(config.key_bits, 6);
        assert!(config.seed_colors.is_empty());
        assert_eq!(config.output.format, OutputFormat::Apng);
        assert_eq!(config.output.delay_ms, 100);
        assert_eq!(config.output.disposal, DisposalSetting::Background);
        assert_eq!(config.output.loops, 0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str(
            r#"
colors: 64
aggregation: mean
output:
  disposal: previous
"#,
        )
        .unwrap();

        assert_eq!(config.colors, 64);
        assert_eq!(config.aggregation, AggregationSetting::Mean);
        assert_eq!(config.output.disposal, DisposalSetting::Previous);
        assert_eq!(config.output.delay_ms, 100);
        assert_eq!(config.key_bits, 6);
    }

    #[test]
    fn test_full_yaml() {
        let config = Config::from_yaml_str(
            r##"
colors: 16
aggregation: mode
reserve_transparent: true
key_bits: 8
seed_colors: ["#000", "#ffffff"]
output:
  format: frames
  delay_ms: 40
  disposal: none
  loops: 3
  optimize: true
"##,
        )
        .unwrap();

        assert!(config.reserve_transparent);
        assert_eq!(config.key_bits, 8);
        assert_eq!(
            config.seed_colors().unwrap(),
            vec![Rgba8::opaque(0, 0, 0), Rgba8::opaque(255, 255, 255)]
        );
        assert_eq!(config.output.format, OutputFormat::Frames);
        assert_eq!(config.output.loops, 3);
        assert!(config.output.optimize);
        assert_eq!(config.timing(), FrameTiming::new(40, Disposal::None));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_yaml_str("colors: 0"),
            Err(FramepalError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("colors: 300"),
            Err(FramepalError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("key_bits: 9"),
            Err(FramepalError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("aggregation: median"),
            Err(FramepalError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("colors: 2\nseed_colors: ['#000', '#fff']"),
            Err(FramepalError::Config(_))
        ));
    }

    #[test]
    fn test_bad_seed_color() {
        let config = Config::from_yaml_str("seed_colors: ['#12345']").unwrap();
        assert!(matches!(
            config.seed_colors(),
            Err(FramepalError::SeedColor { .. })
        ));
    }

    #[test]
    fn test_overrides_apply_on_top() {
        let mut config = Config::from_yaml_str("colors: 64\noutput:\n  delay_ms: 50").unwrap();
        config
            .apply(&ConfigOverrides {
                colors: Some(8),
                disposal: Some(DisposalSetting::Previous),
                optimize: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.colors, 8);
        assert_eq!(config.output.delay_ms, 50);
        assert_eq!(config.output.disposal, DisposalSetting::Previous);
        assert!(config.output.optimize);
    }

    #[test]
    fn test_key_bits_override_is_applied_and_validated() {
        let mut config = Config::default();
        config
            .apply(&ConfigOverrides {
                key_bits: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.key_bits, 3);

        let result = config.apply(&ConfigOverrides {
            key_bits: Some(0),
            ..Default::default()
        });
        assert!(matches!(result, Err(FramepalError::Config(_))));
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut config = Config::default();
        let result = config.apply(&ConfigOverrides {
            colors: Some(1000),
            ..Default::default()
        });
        assert!(matches!(result, Err(FramepalError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framepal.yaml");
        std::fs::write(&path, "colors: 32\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().colors, 32);
        assert_eq!(Config::load_or_default(Some(&path)).unwrap().colors, 32);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(FramepalError::Io(_))));
    }
}
