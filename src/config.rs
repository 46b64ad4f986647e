//! Chart configuration with layered resolution.
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied via [`SpcConfig::apply_cli_overrides`])
//! 2. Environment variables (`SPC_*`)
//! 3. Project config (`spc.toml` in the working directory)
//! 4. Compiled defaults
//!
//! ```toml
//! chart_type = "xbar"
//! subgroup_size = 4
//! sample_size = 200
//!
//! [constants]      # optional, replaces the table row for subgroup_size
//! a2 = 0.729
//! d3 = 0.0
//! d4 = 2.282
//!
//! [production]
//! variable = "Shaft"
//! parameter = "Diameter"
//! ```
//!
//! The limit engine never reads this module: callers resolve a config and
//! pass its values explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::ingest::ProductionTags;
use crate::spc::{ChartConstants, ChartType, DEFAULT_SUBGROUP_SIZE};

/// Name of the project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "spc.toml";

/// Chart selection, constants and production tags.
///
/// Unset fields fall back to compiled defaults through the accessor
/// methods. The P-chart `sample_size` has no default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpcConfig {
    /// Chart to compute. Accepts any spelling [`ChartType`]'s `FromStr` does.
    pub chart_type: Option<ChartType>,
    /// Subgroup size used to look up A2/D3/D4. Default: 5.
    pub subgroup_size: Option<usize>,
    /// Explicit factors; take precedence over the table row.
    pub constants: Option<ChartConstants>,
    /// Units inspected per subgroup, read by the P chart only.
    pub sample_size: Option<u64>,
    /// Tags stamped onto ingested subgroups.
    pub production: ProductionTags,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub chart_type: Option<ChartType>,
    pub subgroup_size: Option<usize>,
    pub sample_size: Option<u64>,
}

impl SpcConfig {
    /// Load configuration with layered resolution rooted at `root`.
    ///
    /// # Errors
    ///
    /// Parse errors in `spc.toml`, an unrecognised `SPC_CHART_TYPE`, or a
    /// final config that fails [`SpcConfig::validate`].
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            info!(path = %project_config_path.display(), "loaded project config");
        }

        config.apply_env_overrides()?;

        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Selected chart. Default: X-bar.
    pub fn chart_type(&self) -> ChartType {
        self.chart_type.unwrap_or_default()
    }

    /// Subgroup size for the constants table. Default: 5.
    pub fn subgroup_size(&self) -> usize {
        self.subgroup_size.unwrap_or(DEFAULT_SUBGROUP_SIZE)
    }

    /// Explicit constants if set, else the table row for [`Self::subgroup_size`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedSubgroupSize`] when no explicit constants
    /// are set and the subgroup size is outside 2..=10.
    pub fn resolved_constants(&self) -> Result<ChartConstants, ConfigError> {
        if let Some(constants) = self.constants {
            return Ok(constants);
        }
        let n = self.subgroup_size();
        ChartConstants::for_subgroup_size(n).ok_or(ConfigError::UnsupportedSubgroupSize(n))
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolved_constants()?.validate()?;
        if self.sample_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "sample_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply command-line overrides.
    ///
    /// A subgroup size given on the command line also discards explicit
    /// constants from lower layers, so the table row for that size is used.
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(chart_type) = cli.chart_type {
            self.chart_type = Some(chart_type);
        }
        if let Some(n) = cli.subgroup_size {
            self.subgroup_size = Some(n);
            self.constants = None;
        }
        if let Some(n) = cli.sample_size {
            self.sample_size = Some(n);
        }
    }

    /// Apply `SPC_*` environment variables.
    ///
    /// Unparseable numeric values are ignored with a warning. As on the
    /// command line, `SPC_SUBGROUP_SIZE` discards explicit constants from
    /// the project file; `SPC_A2`/`SPC_D3`/`SPC_D4` then patch the table
    /// row for that size.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SPC_CHART_TYPE") {
            self.chart_type = Some(val.parse()?);
        }
        if let Some(v) = env_number::<usize>("SPC_SUBGROUP_SIZE") {
            // Factors from spc.toml belong to the file's subgroup size.
            self.subgroup_size = Some(v);
            self.constants = None;
        }
        if let Some(v) = env_number::<u64>("SPC_SAMPLE_SIZE") {
            self.sample_size = Some(v);
        }

        let a2 = env_number::<f64>("SPC_A2");
        let d3 = env_number::<f64>("SPC_D3");
        let d4 = env_number::<f64>("SPC_D4");
        if a2.is_some() || d3.is_some() || d4.is_some() {
            let mut constants = self
                .constants
                .or_else(|| ChartConstants::for_subgroup_size(self.subgroup_size()))
                .unwrap_or_default();
            if let Some(v) = a2 {
                constants.a2 = v;
            }
            if let Some(v) = d3 {
                constants.d3 = v;
            }
            if let Some(v) = d4 {
                constants.d4 = v;
            }
            self.constants = Some(constants);
        }

        if let Ok(val) = std::env::var("SPC_VARIABLE") {
            self.production.variable = Some(val);
        }
        if let Ok(val) = std::env::var("SPC_PARAMETER") {
            self.production.parameter = Some(val);
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut SpcConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SpcConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut SpcConfig, other: &SpcConfig) {
        if other.chart_type.is_some() {
            base.chart_type = other.chart_type;
        }
        if other.subgroup_size.is_some() {
            base.subgroup_size = other.subgroup_size;
        }
        if other.constants.is_some() {
            base.constants = other.constants;
        }
        if other.sample_size.is_some() {
            base.sample_size = other.sample_size;
        }
        if other.production.variable.is_some() {
            base.production.variable = other.production.variable.clone();
        }
        if other.production.parameter.is_some() {
            base.production.parameter = other.production.parameter.clone();
        }
    }
}

/// Read and parse a numeric environment variable.
fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %val, "ignoring unparseable environment override");
            None
        }
    }
}
