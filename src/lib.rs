//! # building_tour
//!
//! Models a building as a weighted tree (rooms are nodes, corridors are
//! undirected weighted edges) and plans a walking route from a chosen room
//! that visits every dead-end room.
//!
//! ```
//! use building_tour::Building;
//!
//! let mut building = Building::new("a")?;
//! building.add_room("b", "a", 2)?;
//! building.add_room("c", "a", 5)?;
//!
//! let route: Vec<&str> = building.shortest_path("a")?.iter().map(|r| r.id()).collect();
//! assert_eq!(route, ["a", "b", "a", "c"]);
//! # Ok::<(), building_tour::BuildingError>(())
//! ```

pub mod building;
pub mod config;
pub mod corridor;
pub mod error;
pub mod plan;
pub mod room;
mod traversal;

pub use building::{Building, Leg};
pub use config::{Config, RouteLimits};
pub use corridor::{Corridor, CorridorIndex};
pub use error::{BuildingError, ConfigError, PlanError};
pub use plan::{load_plan, read_plan};
pub use room::{Link, Room, RoomIndex};
