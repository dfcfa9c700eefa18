//! Application configuration
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `departures.toml` in the working directory, or the file given with
//!    `--config` (then required)
//! 3. environment variables prefixed with `DEPARTURES_`, sections separated
//!    by a double underscore (e.g. `DEPARTURES_TRANSIT__CITY=krakow`)

use std::path::Path;

use application::{ApplicationError, ControllerSettings};
use domain::{Coordinate, ResultLimit};
use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};

use crate::adapters::MAX_ZOOM;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "DEPARTURES";

/// Name of the optional configuration file (extension is detected)
pub const DEFAULT_CONFIG_NAME: &str = "departures";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Closest-departures API
    #[serde(default)]
    pub transit: TransitConfig,

    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,

    /// Search form defaults
    #[serde(default)]
    pub search: SearchConfig,
}

/// Initial map view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude of the initial center
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// Longitude of the initial center
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

const fn default_center_latitude() -> f64 {
    Coordinate::wroclaw().latitude()
}

const fn default_center_longitude() -> f64 {
    Coordinate::wroclaw().longitude()
}

const fn default_zoom() -> u8 {
    13
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
        }
    }
}

/// Search form defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Limit pre-filled in the form
    #[serde(default = "default_limit")]
    pub default_limit: u8,
}

const fn default_limit() -> u8 {
    ResultLimit::DEFAULT.get()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if a
    /// source cannot be parsed into the expected shape.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.transit
            .validate()
            .map_err(|e| format!("transit: {e}"))?;

        if Coordinate::new(self.map.center_latitude, self.map.center_longitude).is_err() {
            return Err(format!(
                "map: center ({}, {}) is out of range",
                self.map.center_latitude, self.map.center_longitude
            ));
        }
        if self.map.zoom > MAX_ZOOM {
            return Err(format!("map: zoom must be at most {MAX_ZOOM}"));
        }

        if ResultLimit::new(i64::from(self.search.default_limit)).is_err() {
            return Err(format!(
                "search: default_limit must be between {} and {}",
                ResultLimit::MIN,
                ResultLimit::MAX
            ));
        }

        Ok(())
    }

    /// Controller settings derived from the map and search sections
    ///
    /// # Errors
    ///
    /// Returns an error if the center, zoom or default limit is invalid.
    pub fn controller_settings(&self) -> Result<ControllerSettings, ApplicationError> {
        if self.map.zoom > MAX_ZOOM {
            return Err(ApplicationError::Configuration(format!(
                "zoom {} exceeds {MAX_ZOOM}",
                self.map.zoom
            )));
        }

        Ok(ControllerSettings {
            map_center: Coordinate::new(self.map.center_latitude, self.map.center_longitude)?,
            zoom: self.map.zoom,
            default_limit: ResultLimit::new(i64::from(self.search.default_limit))?,
        })
    }

    /// Render the effective configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
