// Engine tuning configuration (engine.toml).
//
// Every layout constant that is an aesthetic choice rather than a
// correctness requirement lives here so organizers' themes can tweak the
// look without a rebuild. `EngineConfig::default()` matches
// `defaults/engine.toml` exactly.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CONFIG_FILE: &str = "engine.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub spiral: SpiralConfig,
    pub sizing: SizingConfig,
    pub tiers: TierConfig,
    pub filter: FilterOptions,
}

// ---------------------------------------------------------------------------
// [spiral]
// ---------------------------------------------------------------------------

/// Word-cloud spiral search parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    /// Radians added to the spiral angle per attempt.
    pub angle_step: f64,
    /// Pixels added to the spiral radius per attempt.
    pub radius_step: f64,
    pub base_radius: f64,
    pub jitter_amplitude: f64,
    /// Angular frequency of the jitter sine, per attempt.
    pub jitter_frequency: f64,
    /// Multiplier on the vertical offset; < 1 flattens the cloud.
    pub vertical_compression: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Minimum gap between two placed boxes.
    pub padding: f64,
    pub max_attempts: usize,
    /// Center height as a fraction of the container, for small batches.
    pub center_y_min: f64,
    /// Center height fraction once the largest box reaches `center_size_high`.
    pub center_y_max: f64,
    pub center_size_low: f64,
    pub center_size_high: f64,
    pub fallback_angle_step: f64,
    pub fallback_radius_step: f64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        SpiralConfig {
            angle_step: 0.4,
            radius_step: 4.0,
            base_radius: 0.0,
            jitter_amplitude: 8.0,
            jitter_frequency: 0.5,
            vertical_compression: 0.6,
            margin_x: 10.0,
            margin_y: 20.0,
            padding: 6.0,
            max_attempts: 2000,
            center_y_min: 0.31,
            center_y_max: 0.35,
            center_size_low: 60.0,
            center_size_high: 240.0,
            fallback_angle_step: 0.9,
            fallback_radius_step: 12.0,
        }
    }
}

// ---------------------------------------------------------------------------
// [sizing]
// ---------------------------------------------------------------------------

/// Box-size formula constants shared by placement and rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Horizontal padding around a logo.
    pub logo_padding: f64,
    /// Minimum width of a logo-with-name card.
    pub logo_min_width: f64,
    /// Logo height as a fraction of its width.
    pub logo_aspect: f64,
    pub caption_font_size: f64,
    pub caption_line_height: f64,
    /// Space between logo and caption, plus card padding.
    pub caption_gap: f64,
    /// Average glyph width as a fraction of the font size.
    pub char_width: f64,
    /// Text boxes are never narrower than this many glyphs.
    pub min_text_chars: f64,
    pub text_line_height: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            logo_padding: 16.0,
            logo_min_width: 60.0,
            logo_aspect: 0.8,
            caption_font_size: 12.0,
            caption_line_height: 1.25,
            caption_gap: 12.0,
            char_width: 0.6,
            min_text_chars: 3.0,
            text_line_height: 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// [tiers]
// ---------------------------------------------------------------------------

/// Minimum amounts for each display tier above `small`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub medium: f64,
    pub large: f64,
    pub xlarge: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        TierConfig {
            medium: 50.0,
            large: 100.0,
            xlarge: 250.0,
        }
    }
}

// ---------------------------------------------------------------------------
// [filter]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Show sponsors whose payment is still pending (rendered dimmed).
    pub show_pending: bool,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse an engine config from TOML text and validate it.
pub fn parse_config(text: &str, path: &Path) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate `config/engine.toml` relative to `base_dir`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<EngineConfig, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    parse_config(&text, &path)
}

/// Copy `defaults/engine.toml` to `config/engine.toml` unless the latter
/// already exists. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() || !source.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "failed to copy {} to {}: {e}",
            source.display(),
            target.display()
        ),
    })?;

    Ok(Some(target))
}

/// Load the engine config for `base_dir`, seeding it from `defaults/` on
/// first run. Falls back to built-in defaults when neither file exists.
pub fn load_config_in(base_dir: &Path) -> Result<EngineConfig, ConfigError> {
    if let Some(copied) = ensure_config_file(base_dir)? {
        info!("Seeded {} from defaults", copied.display());
    }
    match load_config_from(base_dir) {
        Err(ConfigError::FileNotFound { path }) => {
            info!("{} not found, using built-in defaults", path.display());
            Ok(EngineConfig::default())
        }
        other => other,
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    let spiral = &config.spiral;

    let positive: &[(&str, f64)] = &[
        ("spiral.angle_step", spiral.angle_step),
        ("spiral.radius_step", spiral.radius_step),
        ("spiral.vertical_compression", spiral.vertical_compression),
        ("spiral.fallback_angle_step", spiral.fallback_angle_step),
        ("spiral.fallback_radius_step", spiral.fallback_radius_step),
        ("sizing.logo_aspect", config.sizing.logo_aspect),
        ("sizing.caption_font_size", config.sizing.caption_font_size),
        ("sizing.caption_line_height", config.sizing.caption_line_height),
        ("sizing.char_width", config.sizing.char_width),
        ("sizing.text_line_height", config.sizing.text_line_height),
    ];
    for (name, val) in positive {
        if !val.is_finite() || *val <= 0.0 {
            return Err(invalid(name, format!("must be > 0, got {val}")));
        }
    }

    let non_negative: &[(&str, f64)] = &[
        ("spiral.base_radius", spiral.base_radius),
        ("spiral.jitter_amplitude", spiral.jitter_amplitude),
        ("spiral.margin_x", spiral.margin_x),
        ("spiral.margin_y", spiral.margin_y),
        ("spiral.padding", spiral.padding),
        ("spiral.center_size_low", spiral.center_size_low),
        ("spiral.center_size_high", spiral.center_size_high),
        ("sizing.logo_padding", config.sizing.logo_padding),
        ("sizing.logo_min_width", config.sizing.logo_min_width),
        ("sizing.caption_gap", config.sizing.caption_gap),
        ("sizing.min_text_chars", config.sizing.min_text_chars),
    ];
    for (name, val) in non_negative {
        if !val.is_finite() || *val < 0.0 {
            return Err(invalid(name, format!("must be >= 0, got {val}")));
        }
    }

    if spiral.max_attempts == 0 {
        return Err(invalid("spiral.max_attempts", "must be > 0".into()));
    }

    for (name, val) in [
        ("spiral.center_y_min", spiral.center_y_min),
        ("spiral.center_y_max", spiral.center_y_max),
    ] {
        if !(0.0..=1.0).contains(&val) {
            return Err(invalid(
                name,
                format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            ));
        }
    }
    if spiral.center_y_min > spiral.center_y_max {
        return Err(invalid(
            "spiral.center_y_min",
            format!(
                "must not exceed center_y_max ({} > {})",
                spiral.center_y_min, spiral.center_y_max
            ),
        ));
    }
    if spiral.center_size_low >= spiral.center_size_high {
        return Err(invalid(
            "spiral.center_size_low",
            "must be less than center_size_high".into(),
        ));
    }

    let tiers = &config.tiers;
    if !(tiers.medium > 0.0 && tiers.medium < tiers.large && tiers.large < tiers.xlarge) {
        return Err(invalid(
            "tiers",
            format!(
                "thresholds must be positive and strictly ascending, got {}/{}/{}",
                tiers.medium, tiers.large, tiers.xlarge
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn defaults_text() -> String {
        fs::read_to_string(crate_root().join("defaults/engine.toml")).unwrap()
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        tmp
    }

    fn expect_field(err: ConfigError, expected: &str) {
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn defaults_file_matches_builtin_defaults() {
        let config = parse_config(&defaults_text(), Path::new("engine.toml"))
            .expect("defaults should parse");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let config = parse_config(
            "[spiral]\nmax_attempts = 50\n",
            Path::new("engine.toml"),
        )
        .unwrap();
        assert_eq!(config.spiral.max_attempts, 50);
        assert!((config.spiral.angle_step - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.sizing, SizingConfig::default());
        assert!(!config.filter.show_pending);
    }

    #[test]
    fn rejects_zero_attempts() {
        let text = defaults_text().replace("max_attempts = 2000", "max_attempts = 0");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "spiral.max_attempts");
    }

    #[test]
    fn rejects_negative_padding() {
        let text = defaults_text().replace("padding = 6.0", "padding = -1.0");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "spiral.padding");
    }

    #[test]
    fn rejects_inverted_center_range() {
        let text = defaults_text().replace("center_y_min = 0.31", "center_y_min = 0.5");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "spiral.center_y_min");
    }

    #[test]
    fn rejects_non_finite_center_sizes() {
        let text = defaults_text().replace("center_size_high = 240.0", "center_size_high = nan");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "spiral.center_size_high");

        let text = defaults_text().replace("center_size_low = 60.0", "center_size_low = nan");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "spiral.center_size_low");
    }

    #[test]
    fn rejects_unordered_tiers() {
        let text = defaults_text().replace("large = 100.0", "large = 500.0");
        let err = parse_config(&text, Path::new("engine.toml")).unwrap_err();
        expect_field(err, "tiers");
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let err = parse_config("this is not [[[ toml", Path::new("engine.toml")).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("engine.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
    }

    #[test]
    fn load_from_missing_dir_reports_file_not_found() {
        let tmp = scratch("gyb_config_missing");
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("engine.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_defaults_once() {
        let tmp = scratch("gyb_config_seed");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/engine.toml"), defaults_text()).unwrap();

        let copied = ensure_config_file(&tmp).unwrap();
        assert!(copied.is_some_and(|p| p.ends_with("config/engine.toml")));

        // A customized config must survive a second run.
        fs::write(tmp.join("config/engine.toml"), "[filter]\nshow_pending = true\n").unwrap();
        assert!(ensure_config_file(&tmp).unwrap().is_none());
        let config = load_config_in(&tmp).unwrap();
        assert!(config.filter.show_pending);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_config_in_falls_back_to_builtin_defaults() {
        let tmp = scratch("gyb_config_builtin");
        let config = load_config_in(&tmp).unwrap();
        assert_eq!(config, EngineConfig::default());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_config_in_surfaces_validation_errors() {
        let tmp = scratch("gyb_config_invalid");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/engine.toml"), "[sizing]\nchar_width = 0.0\n").unwrap();
        let err = load_config_in(&tmp).unwrap_err();
        expect_field(err, "sizing.char_width");
        let _ = fs::remove_dir_all(&tmp);
    }
}
