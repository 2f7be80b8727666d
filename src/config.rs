//! Runtime configuration: route limits and the default log filter.
//!
//! Read from an optional JSON file; command-line flags override file values.
//! Size limits are a policy of the caller and are never applied by the
//! traversal code itself.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::error::{BuildingError, ConfigError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: RouteLimits,
    /// `EnvFilter` directive used when no `-v` flag is given, e.g. `"warn"`.
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteLimits {
    /// Largest building a route may be planned for. `None` means unlimited.
    pub max_rooms: Option<usize>,
}

impl RouteLimits {
    pub fn check(&self, building: &Building) -> Result<(), BuildingError> {
        match self.max_rooms {
            Some(limit) if building.number_of_rooms() > limit => Err(BuildingError::RoomLimitExceeded {
                rooms: building.number_of_rooms(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_max_rooms(mut self, max_rooms: Option<usize>) -> Self {
        if max_rooms.is_some() {
            self.limits.max_rooms = max_rooms;
        }
        self
    }
}
