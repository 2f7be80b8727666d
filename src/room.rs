//! Rooms: the nodes of a building's tree.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::corridor::CorridorIndex;

/// Stable handle of a room inside its building. Assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomIndex(pub(crate) usize);

impl RoomIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of a room's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub corridor: CorridorIndex,
    pub neighbor: RoomIndex,
}

/// A room in a building.
///
/// Rooms carry no traversal state; every query keeps its own visited,
/// distance and parent bookkeeping. Two rooms are equal when their ids are.
#[derive(Debug, Clone)]
pub struct Room {
    id: String,
    index: RoomIndex,
    adjacency: Vec<Link>, // insertion order
}

impl Room {
    pub(crate) fn new(id: String, index: RoomIndex) -> Self {
        Self { id, index, adjacency: Vec::new() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> RoomIndex {
        self.index
    }

    /// Incident corridors with the room at their other end, oldest first.
    pub fn adjacency(&self) -> &[Link] {
        &self.adjacency
    }

    pub fn corridors(&self) -> impl Iterator<Item = CorridorIndex> + '_ {
        self.adjacency.iter().map(|link| link.corridor)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = RoomIndex> + '_ {
        self.adjacency.iter().map(|link| link.neighbor)
    }

    pub fn number_of_connections(&self) -> usize {
        self.adjacency.len()
    }

    /// A leaf is a dead end: exactly one corridor.
    pub fn is_leaf(&self) -> bool {
        self.adjacency.len() == 1
    }

    /// Whether a corridor joins this room to `other`. A room is never connected to itself.
    pub fn is_connected_to(&self, other: &Room) -> bool {
        self.index != other.index && self.neighbors().any(|n| n == other.index)
    }

    /// Registers a corridor. Returns false, and changes nothing, when a corridor
    /// to the same neighbor is already registered.
    pub(crate) fn connect(&mut self, link: Link) -> bool {
        if self.neighbors().any(|n| n == link.neighbor) {
            return false;
        }
        self.adjacency.push(link);
        true
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Room {}

impl Hash for Room {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq<str> for Room {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl PartialEq<&str> for Room {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
