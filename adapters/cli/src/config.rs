use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use life_sandbox_system_automaton::Engine;
use life_sandbox_system_seeding::{Pattern, UnknownPattern};
use serde::{Deserialize, Deserializer};

use crate::args::CliArgs;

/// How the board is populated before the first generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Seeding {
    /// Random fill at the configured density.
    #[default]
    Random,
    /// A named pattern centered on the board.
    Pattern(Pattern),
}

impl FromStr for Seeding {
    type Err = UnknownPattern;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("random") {
            Ok(Self::Random)
        } else {
            value.parse().map(Self::Pattern)
        }
    }
}

/// Settings for one sandbox run, read from TOML and overridden by flags.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SandboxConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(deserialize_with = "parse_field")]
    pub(crate) pattern: Seeding,
    pub(crate) pattern_file: Option<PathBuf>,
    pub(crate) density: f64,
    pub(crate) rng_seed: Option<u64>,
    pub(crate) generations: Option<u64>,
    pub(crate) fps: f64,
    #[serde(deserialize_with = "parse_field")]
    pub(crate) engine: Engine,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 48,
            pattern: Seeding::Random,
            pattern_file: None,
            density: 0.25,
            rng_seed: None,
            generations: None,
            fps: 60.0,
            engine: Engine::Sparse,
        }
    }
}

impl SandboxConfig {
    /// Reads the file at `path`, or returns the defaults when there is none.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid sandbox configuration")
    }

    /// Replaces every setting the command line specified.
    pub(crate) fn with_overrides(mut self, args: &CliArgs) -> Self {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(pattern) = args.pattern {
            self.pattern = pattern;
            self.pattern_file = None;
        }
        if let Some(path) = &args.pattern_file {
            self.pattern_file = Some(path.clone());
        }
        if let Some(density) = args.density {
            self.density = density;
        }
        if args.rng_seed.is_some() {
            self.rng_seed = args.rng_seed;
        }
        if args.generations.is_some() {
            self.generations = args.generations;
        }
        if let Some(fps) = args.fps {
            self.fps = fps;
        }
        if let Some(engine) = args.engine {
            self.engine = engine;
        }
        self
    }
}

fn parse_field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = SandboxConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, SandboxConfig::default());
        assert_eq!(config.density, 0.25);
        assert_eq!(config.pattern, Seeding::Random);
    }

    #[test]
    fn parses_every_setting() {
        let config = SandboxConfig::from_toml(
            r#"
            width = 32
            height = 24
            pattern = "glider"
            density = 0.4
            rng_seed = 7
            generations = 500
            fps = 0.0
            engine = "dense"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.width, 32);
        assert_eq!(config.height, 24);
        assert_eq!(config.pattern, Seeding::Pattern(Pattern::Glider));
        assert_eq!(config.density, 0.4);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.generations, Some(500));
        assert_eq!(config.fps, 0.0);
        assert_eq!(config.engine, Engine::Dense);
    }

    #[test]
    fn rejects_unknown_names_and_keys() {
        assert!(SandboxConfig::from_toml("pattern = \"toad\"").is_err());
        assert!(SandboxConfig::from_toml("engine = \"gpu\"").is_err());
        assert!(SandboxConfig::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn command_line_overrides_file_values() {
        let file = SandboxConfig::from_toml(
            r#"
            width = 32
            pattern_file = "shape.txt"
            fps = 10.0
            "#,
        )
        .expect("valid config");
        let args = CliArgs::parse_from(["life-sandbox", "--pattern", "block", "--height", "9"]);

        let config = file.with_overrides(&args);
        assert_eq!(config.width, 32, "kept from the file");
        assert_eq!(config.height, 9);
        assert_eq!(config.pattern, Seeding::Pattern(Pattern::Block));
        assert_eq!(config.pattern_file, None, "named pattern replaces the file");
        assert_eq!(config.fps, 10.0);
    }

    #[test]
    fn missing_config_file_is_reported_with_its_path() {
        let error = SandboxConfig::load(Some(Path::new("/nonexistent/sandbox.toml")))
            .expect_err("file does not exist");
        assert!(error.to_string().contains("/nonexistent/sandbox.toml"));
    }
}
