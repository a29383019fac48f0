// strut_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the simulation scenario from disk.

pub mod structs;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

pub use structs::{ScenarioConfig, VehicleConfig, WheelMountConfig};

/// Environment variables prefixed with `STRUT_` override scenario values,
/// with `__` separating nested keys (e.g. `STRUT_SIMULATION__FIXED_RATE_HZ=120`).
const ENV_PREFIX: &str = "STRUT_";

/// Sections that may be overridden from the environment. Other `STRUT_*`
/// variables are ignored rather than rejected as unknown fields.
const ENV_SECTIONS: [&str; 2] = ["simulation__", "world__"];

/// Loads a scenario file, layering environment overrides on top.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, figment::Error> {
    Figment::new()
        .merge(Toml::file(path.as_ref()))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .filter(|key| {
                    let key = key.as_str().to_ascii_lowercase();
                    ENV_SECTIONS.iter().any(|section| key.starts_with(section))
                })
                .split("__"),
        )
        .extract()
}

/// Parses a scenario from a TOML string. No environment overrides are applied.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, figment::Error> {
    Figment::from(Toml::string(toml)).extract()
}
