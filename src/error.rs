//! Error types for building construction, routing and plan loading.

use thiserror::Error;

/// Errors raised by `Building`, `Room` and `Corridor` operations.
///
/// Everything except `BrokenInvariant` is an input-validation failure and is
/// reported before any state changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildingError {
    /// A required room identifier was missing or blank.
    #[error("missing argument: {what}")]
    NullArgument {
        /// Which argument was missing.
        what: &'static str,
    },

    /// A corridor distance was negative.
    #[error("corridor distance must be non-negative, got {distance}")]
    InvalidDistance { distance: i64 },

    /// The room to attach to is not part of the building.
    #[error("connection room `{id}` is not in the building")]
    UnknownConnectionPoint { id: String },

    /// A queried room is not part of the building.
    #[error("room `{id}` is not in the building")]
    UnknownRoom { id: String },

    /// A room with the same identifier already exists.
    #[error("room `{id}` is already in the building")]
    DuplicateRoom { id: String },

    /// `other_end` was asked about a room that the corridor does not touch.
    #[error("room `{room}` is not an endpoint of corridor {corridor}")]
    InvalidEndpoint { room: String, corridor: String },

    /// The tree structure is inconsistent. Never produced by valid input.
    #[error("broken tree invariant: {0}")]
    BrokenInvariant(String),

    /// The building is larger than the configured route limit allows.
    #[error("building has {rooms} rooms, limit is {limit}")]
    RoomLimitExceeded { rooms: usize, limit: usize },
}

/// Errors raised while loading a building plan file.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The plan contained a header but no rooms.
    #[error("building plan contains no rooms")]
    Empty,

    /// The loaded building failed its global tree check.
    #[error(transparent)]
    Building(#[from] BuildingError),

    /// A row was rejected by the building.
    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: BuildingError,
    },
}

/// Errors raised while reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
