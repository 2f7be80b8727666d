//! Undirected weighted edges between two rooms.

use std::fmt;

use crate::error::BuildingError;
use crate::room::RoomIndex;

/// Stable handle of a corridor inside its building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorridorIndex(pub(crate) usize);

impl CorridorIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// A corridor connecting two rooms. Room order carries no meaning.
#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    room_a: RoomIndex,
    room_b: RoomIndex,
    distance: i64,
}

impl Corridor {
    /// Only `Building::add_room` creates corridors, after it has validated the distance.
    pub(crate) fn new(room_a: RoomIndex, room_b: RoomIndex, distance: i64) -> Self {
        debug_assert!(distance >= 0);
        Self { room_a, room_b, distance }
    }

    pub fn room_a(&self) -> RoomIndex {
        self.room_a
    }

    pub fn room_b(&self) -> RoomIndex {
        self.room_b
    }

    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Whether `room` is one of the two endpoints.
    pub fn connects(&self, room: RoomIndex) -> bool {
        self.room_a == room || self.room_b == room
    }

    /// Whether the two corridors meet in at least one room.
    pub fn shares_room_with(&self, other: &Corridor) -> bool {
        self.connects(other.room_a) || self.connects(other.room_b)
    }

    /// Returns the endpoint opposite to `room`.
    pub fn other_end(&self, room: RoomIndex) -> Result<RoomIndex, BuildingError> {
        if self.room_a == room {
            Ok(self.room_b)
        } else if self.room_b == room {
            Ok(self.room_a)
        } else {
            Err(BuildingError::InvalidEndpoint {
                room: room.to_string(),
                corridor: self.to_string(),
            })
        }
    }
}

/// Same unordered pair of rooms, regardless of distance.
impl PartialEq for Corridor {
    fn eq(&self, other: &Self) -> bool {
        (self.room_a == other.room_a && self.room_b == other.room_b)
            || (self.room_a == other.room_b && self.room_b == other.room_a)
    }
}

impl Eq for Corridor {}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {} ({})", self.room_a, self.room_b, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> RoomIndex {
        RoomIndex(i)
    }

    #[test]
    fn test_other_end() {
        let c = Corridor::new(idx(0), idx(1), 4);
        assert_eq!(c.other_end(idx(0)), Ok(idx(1)));
        assert_eq!(c.other_end(idx(1)), Ok(idx(0)));
    }

    #[test]
    fn test_other_end_rejects_foreign_room() {
        let c = Corridor::new(idx(0), idx(1), 4);
        let err = c.other_end(idx(7)).unwrap_err();
        assert!(matches!(err, BuildingError::InvalidEndpoint { .. }));
        assert_eq!(
            err.to_string(),
            "room `#7` is not an endpoint of corridor #0 <-> #1 (4)"
        );
    }

    #[test]
    fn test_equality_ignores_order_and_distance() {
        let ab = Corridor::new(idx(0), idx(1), 2);
        let ba = Corridor::new(idx(1), idx(0), 9);
        let ac = Corridor::new(idx(0), idx(2), 2);
        assert_eq!(ab, ba);
        assert_ne!(ab, ac);
    }

    #[test]
    fn test_connects_and_shares_room() {
        let ab = Corridor::new(idx(0), idx(1), 2);
        let bc = Corridor::new(idx(1), idx(2), 3);
        let cd = Corridor::new(idx(2), idx(3), 1);
        assert!(ab.connects(idx(1)));
        assert!(!ab.connects(idx(2)));
        assert!(ab.shares_room_with(&bc));
        assert!(!ab.shares_room_with(&cd)); // no room in common
    }
}
