//! Fleet manager configuration.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ```rust,ignore
//! use sena_fleet::FleetConfig;
//!
//! // Load from default path (configs/fleet.yaml)
//! let config = FleetConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = FleetConfig::default();
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! fleet_name: "warehouse_east"
//! waypoint_nearness: 0.5        # graph units
//! relocalization_radius: 0.5    # graph units
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};

fn default_fleet_name() -> String {
    "fleet".to_string()
}

fn default_waypoint_nearness() -> f64 {
    0.5
}

fn default_relocalization_radius() -> f64 {
    // Same radius as waypoint tracking unless overridden.
    default_waypoint_nearness()
}

/// Full fleet manager configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Name of the fleet this manager coordinates
    #[serde(default = "default_fleet_name")]
    pub fleet_name: String,

    /// Distance below which a robot counts as being on a waypoint,
    /// in graph units
    #[serde(default = "default_waypoint_nearness")]
    pub waypoint_nearness: f64,

    /// Maximum distance between a requested relocalization location and
    /// the declared last-visited waypoint, in graph units
    #[serde(default = "default_relocalization_radius")]
    pub relocalization_radius: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            fleet_name: default_fleet_name(),
            waypoint_nearness: default_waypoint_nearness(),
            relocalization_radius: default_relocalization_radius(),
        }
    }
}

impl FleetConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FleetError::Config(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path (configs/fleet.yaml), falling
    /// back to built-in defaults when the file does not exist
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/fleet.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.fleet_name.is_empty() {
            return Err(FleetError::Config("fleet_name must not be empty".into()));
        }
        if self.waypoint_nearness <= 0.0 {
            return Err(FleetError::Config(format!(
                "waypoint_nearness must be positive, got {}",
                self.waypoint_nearness
            )));
        }
        if self.relocalization_radius <= 0.0 {
            return Err(FleetError::Config(format!(
                "relocalization_radius must be positive, got {}",
                self.relocalization_radius
            )));
        }
        Ok(())
    }
}
