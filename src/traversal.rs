//! Per-query traversal bookkeeping.
//!
//! A `Traversal` is created fresh for every query and dropped when the query
//! returns, so nothing has to be reset afterwards and concurrent queries on a
//! shared `&Building` never see each other's marks.

use crate::room::RoomIndex;

#[derive(Debug, Clone)]
pub(crate) struct Traversal {
    visited: Vec<bool>,
    distance: Vec<i64>,
    parent: Vec<Option<RoomIndex>>,
}

impl Traversal {
    pub(crate) fn new(rooms: usize) -> Self {
        Self {
            visited: vec![false; rooms],
            distance: vec![0; rooms],
            parent: vec![None; rooms],
        }
    }

    pub(crate) fn visit(&mut self, room: RoomIndex) {
        self.visited[room.0] = true;
    }

    pub(crate) fn is_visited(&self, room: RoomIndex) -> bool {
        self.visited[room.0]
    }

    pub(crate) fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    pub(crate) fn distance(&self, room: RoomIndex) -> i64 {
        self.distance[room.0]
    }

    pub(crate) fn set_distance(&mut self, room: RoomIndex, distance: i64) {
        self.distance[room.0] = distance;
    }

    pub(crate) fn parent(&self, room: RoomIndex) -> Option<RoomIndex> {
        self.parent[room.0]
    }

    pub(crate) fn set_parent(&mut self, room: RoomIndex, parent: RoomIndex) {
        self.parent[room.0] = Some(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let t = Traversal::new(3);
        assert_eq!(t.visited_count(), 0);
        assert_eq!(t.distance(RoomIndex(0)), 0);
        assert_eq!(t.parent(RoomIndex(2)), None);
    }

    #[test]
    fn test_marks() {
        let mut t = Traversal::new(3);
        t.visit(RoomIndex(1));
        t.set_distance(RoomIndex(1), 7);
        t.set_parent(RoomIndex(1), RoomIndex(0));
        assert!(t.is_visited(RoomIndex(1)));
        assert!(!t.is_visited(RoomIndex(0)));
        assert_eq!(t.visited_count(), 1);
        assert_eq!(t.distance(RoomIndex(1)), 7);
        assert_eq!(t.parent(RoomIndex(1)), Some(RoomIndex(0)));
    }
}
