//! A building: `n` rooms joined by `n - 1` corridors, i.e. a weighted tree.
//!
//! Rooms and corridors live in two arenas owned by the building and refer to
//! each other by index. Every query runs on `&self` with its own
//! `Traversal` state, so a building can be shared across threads and
//! queried concurrently.
//!
//! The full route produced by [`Building::shortest_path`] visits every leaf
//! (dead-end room) in ascending order of its distance from the start room,
//! walking the unique tree path between consecutive leaves. This ordering is
//! a greedy rule; it is not guaranteed to give the globally shortest tour.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::corridor::{Corridor, CorridorIndex};
use crate::error::BuildingError;
use crate::room::{Link, Room, RoomIndex};
use crate::traversal::Traversal;

pub type Result<T> = std::result::Result<T, BuildingError>;

/// One hop of the full route: from the previous stop to the next leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg<'a> {
    pub from: &'a str,
    pub to: &'a str,
    /// Tree distance walked on this leg.
    pub distance: i64,
}

#[derive(Debug, Clone)]
pub struct Building {
    rooms: Vec<Room>,         // insertion order
    corridors: Vec<Corridor>, // creation order
    index: HashMap<String, RoomIndex>,
}

impl Building {
    /// Starts a building with a single room.
    pub fn new(first_room: impl Into<String>) -> Result<Self> {
        let id = first_room.into();
        if id.trim().is_empty() {
            return Err(BuildingError::NullArgument { what: "first_room" });
        }
        let first = Room::new(id.clone(), RoomIndex(0));
        Ok(Self {
            rooms: vec![first],
            corridors: Vec::new(),
            index: HashMap::from([(id, RoomIndex(0))]),
        })
    }

    /// Adds `new_room`, joined to the existing room `attach_to` by a corridor of
    /// length `distance`.
    ///
    /// One room and one corridor are added together, so the building stays a
    /// tree. On error nothing is changed.
    pub fn add_room(
        &mut self,
        new_room: impl Into<String>,
        attach_to: &str,
        distance: i64,
    ) -> Result<RoomIndex> {
        let id = new_room.into();
        if id.trim().is_empty() {
            return Err(BuildingError::NullArgument { what: "new_room" });
        }
        if attach_to.trim().is_empty() {
            return Err(BuildingError::NullArgument { what: "attach_to" });
        }
        if distance < 0 {
            return Err(BuildingError::InvalidDistance { distance });
        }
        let connection = self
            .index
            .get(attach_to)
            .copied()
            .ok_or_else(|| BuildingError::UnknownConnectionPoint { id: attach_to.to_string() })?;
        if self.index.contains_key(&id) {
            return Err(BuildingError::DuplicateRoom { id });
        }

        let room = RoomIndex(self.rooms.len());
        let corridor = CorridorIndex(self.corridors.len());
        tracing::debug!(room = %id, attach_to, distance, "adding room");

        self.index.insert(id.clone(), room);
        self.rooms.push(Room::new(id, room));
        self.corridors.push(Corridor::new(room, connection, distance));
        self.rooms[room.0].connect(Link { corridor, neighbor: connection });
        self.rooms[connection.0].connect(Link { corridor, neighbor: room });
        Ok(room)
    }

    pub fn number_of_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn number_of_corridors(&self) -> usize {
        self.corridors.len()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.index.get(id).map(|i| &self.rooms[i.0])
    }

    pub fn room_at(&self, index: RoomIndex) -> Option<&Room> {
        self.rooms.get(index.0)
    }

    pub fn corridor(&self, index: CorridorIndex) -> Option<&Corridor> {
        self.corridors.get(index.0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The corridor joining two rooms directly, if there is one.
    pub fn corridor_between(&self, a: &str, b: &str) -> Option<&Corridor> {
        let a = self.room(a)?;
        let b = self.room(b)?;
        a.adjacency()
            .iter()
            .find(|link| link.neighbor == b.index())
            .map(|link| &self.corridors[link.corridor.0])
    }

    /// Unique path from `start` to `destination`, both included.
    pub fn traversal(&self, start: &str, destination: &str) -> Result<Vec<&Room>> {
        let start = self.lookup(start, "start")?;
        let destination = self.lookup(destination, "destination")?;
        let path = self.path_between(start, destination)?;
        Ok(self.resolve(&path))
    }

    /// Route from `start` through every leaf, nearest leaf (by distance from
    /// `start`) first.
    pub fn shortest_path(&self, start: &str) -> Result<Vec<&Room>> {
        let start = self.lookup(start, "start")?;
        let route = self.route(start)?;
        Ok(self.resolve(&route))
    }

    /// The full route broken into legs, one per visited leaf.
    pub fn route_legs(&self, start: &str) -> Result<Vec<Leg<'_>>> {
        let start = self.lookup(start, "start")?;
        let mut legs = Vec::new();
        if self.rooms.len() == 1 {
            return Ok(legs);
        }

        let distances = self.connected_distances(start)?;
        let mut current = start;
        for leaf in self.leaves(&distances) {
            if leaf == current {
                continue; // start is itself the nearest leaf
            }
            let hops = self.path_between(current, leaf)?;
            legs.push(Leg {
                from: self.rooms[current.0].id(),
                to: self.rooms[leaf.0].id(),
                distance: self.hops_distance(&hops)?,
            });
            current = leaf;
        }
        Ok(legs)
    }

    /// Total corridor length along `path`. Consecutive rooms must be adjacent.
    pub fn path_distance(&self, path: &[&Room]) -> Result<i64> {
        let hops = path
            .iter()
            .map(|room| self.lookup(room.id(), "path"))
            .collect::<Result<Vec<_>>>()?;
        self.hops_distance(&hops)
    }

    /// Distance from `start` to every room, in insertion order.
    pub fn distances_from(&self, start: &str) -> Result<Vec<(&Room, i64)>> {
        let start = self.lookup(start, "start")?;
        let distances = self.connected_distances(start)?;
        Ok(self.rooms.iter().map(|room| (room, distances.distance(room.index()))).collect())
    }

    /// Leaves in visiting order, with their distance from `start`.
    pub fn leaves_from(&self, start: &str) -> Result<Vec<(&Room, i64)>> {
        let start = self.lookup(start, "start")?;
        let distances = self.connected_distances(start)?;
        Ok(self
            .leaves(&distances)
            .into_iter()
            .map(|leaf| (&self.rooms[leaf.0], distances.distance(leaf)))
            .collect())
    }

    /// Number of rooms reachable from `start`, `start` included.
    pub fn reachable_count(&self, start: &str) -> Result<usize> {
        let start = self.lookup(start, "start")?;
        let mut visited = vec![false; self.rooms.len()];
        let mut queue = VecDeque::from([start]);
        let mut size = 0;
        while let Some(room) = queue.pop_front() {
            if !visited[room.0] {
                visited[room.0] = true;
                size += 1;
                queue.extend(self.rooms[room.0].neighbors().filter(|n| !visited[n.0]));
            }
        } // queue drains once the component is exhausted
        Ok(size)
    }

    /// Checks the whole tree invariant: `rooms = corridors + 1` and connected.
    /// `add_room` keeps this true by construction; this is the global check.
    pub fn validate(&self) -> Result<()> {
        if self.rooms.len() != self.corridors.len() + 1 {
            return Err(self.broken(format!(
                "{} rooms but {} corridors",
                self.rooms.len(),
                self.corridors.len()
            )));
        }
        let reachable = self.reachable_count(self.rooms[0].id())?;
        if reachable != self.rooms.len() {
            return Err(self.broken(format!(
                "only {reachable} of {} rooms are connected",
                self.rooms.len()
            )));
        }
        Ok(())
    }

    /// Rooms by descending number of corridors; ties keep insertion order.
    pub fn degree_ranking(&self) -> Vec<(&Room, usize)> {
        let mut ranking: Vec<(&Room, usize)> =
            self.rooms.iter().map(|room| (room, room.number_of_connections())).collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }

    fn lookup(&self, id: &str, what: &'static str) -> Result<RoomIndex> {
        if id.trim().is_empty() {
            return Err(BuildingError::NullArgument { what });
        }
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| BuildingError::UnknownRoom { id: id.to_string() })
    }

    fn resolve(&self, path: &[RoomIndex]) -> Vec<&Room> {
        path.iter().map(|i| &self.rooms[i.0]).collect()
    }

    fn broken(&self, message: String) -> BuildingError {
        tracing::error!(rooms = self.rooms.len(), "{message}");
        BuildingError::BrokenInvariant(message)
    }

    fn route(&self, start: RoomIndex) -> Result<Vec<RoomIndex>> {
        if self.rooms.len() == 1 {
            return Ok(vec![start]);
        }

        let distances = self.connected_distances(start)?;
        let leaves = self.leaves(&distances);

        let mut route = Vec::new();
        let mut current = start;
        for (i, &leaf) in leaves.iter().enumerate() {
            let mut leg = self.path_between(current, leaf)?;
            if i + 1 < leaves.len() {
                leg.pop(); // the leaf opens the next leg
            }
            route.extend(leg);
            current = leaf;
        }

        let mut seen = vec![false; self.rooms.len()];
        for room in &route {
            seen[room.0] = true;
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(self.broken(format!(
                "route from `{}` never reaches `{}`",
                self.rooms[start.0],
                self.rooms[missing]
            )));
        }

        tracing::debug!(
            start = %self.rooms[start.0],
            leaves = leaves.len(),
            stops = route.len(),
            "route built"
        );
        Ok(route)
    }

    /// Distances from `start`, failing if some room cannot be reached.
    fn connected_distances(&self, start: RoomIndex) -> Result<Traversal> {
        let distances = self.update_distances(start)?;
        let reached = distances.visited_count();
        if reached != self.rooms.len() {
            return Err(self.broken(format!(
                "only {reached} of {} rooms reachable from `{}`",
                self.rooms.len(),
                self.rooms[start.0]
            )));
        }
        Ok(distances)
    }

    /// Depth-first walk from `start` recording every reachable room's distance.
    fn update_distances(&self, start: RoomIndex) -> Result<Traversal> {
        let mut state = Traversal::new(self.rooms.len());
        state.visit(start);
        state.set_distance(start, 0);

        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let base = state.distance(current);
            for corridor in self.rooms[current.0].corridors() {
                let corridor = &self.corridors[corridor.0];
                let next = corridor.other_end(current)?;
                if !state.is_visited(next) {
                    state.visit(next);
                    state.set_distance(next, base.saturating_add(corridor.distance()));
                    stack.push(next);
                }
            }
        }
        Ok(state)
    }

    /// Leaves ordered by distance from the traversal's start. The sort is
    /// stable, so equal distances keep insertion order.
    fn leaves(&self, distances: &Traversal) -> Vec<RoomIndex> {
        let mut leaves: Vec<RoomIndex> =
            self.rooms.iter().filter(|r| r.is_leaf()).map(Room::index).collect();
        leaves.sort_by_key(|leaf| distances.distance(*leaf));
        leaves
    }

    fn path_between(&self, start: RoomIndex, destination: RoomIndex) -> Result<Vec<RoomIndex>> {
        let search = self.search(start, destination)?;
        self.build_path(&search, start, destination)
    }

    /// Depth-first search from `start` that records parents until
    /// `destination` is reached.
    fn search(&self, start: RoomIndex, destination: RoomIndex) -> Result<Traversal> {
        let mut state = Traversal::new(self.rooms.len());
        state.visit(start);

        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == destination {
                break;
            }
            for corridor in self.rooms[current.0].corridors() {
                let next = self.corridors[corridor.0].other_end(current)?;
                if !state.is_visited(next) {
                    state.visit(next);
                    state.set_parent(next, current);
                    stack.push(next);
                }
            }
        }
        Ok(state)
    }

    /// Walks parents back from `destination` to `start`. The walk can never be
    /// longer than the building has rooms.
    fn build_path(
        &self,
        search: &Traversal,
        start: RoomIndex,
        destination: RoomIndex,
    ) -> Result<Vec<RoomIndex>> {
        let mut path = vec![destination];
        let mut current = destination;
        while current != start {
            let parent = search.parent(current).ok_or_else(|| {
                self.broken(format!(
                    "`{}` is unreachable from `{}`",
                    self.rooms[destination.0],
                    self.rooms[start.0]
                ))
            })?;
            if path.len() >= self.rooms.len() {
                return Err(self.broken(format!(
                    "parent chain from `{}` does not end at `{}`",
                    self.rooms[destination.0],
                    self.rooms[start.0]
                )));
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }

    fn hops_distance(&self, hops: &[RoomIndex]) -> Result<i64> {
        let mut total: i64 = 0;
        for pair in hops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let link = self.rooms[from.0]
                .adjacency()
                .iter()
                .find(|link| link.neighbor == to)
                .ok_or_else(|| {
                    self.broken(format!(
                        "no corridor between `{}` and `{}`",
                        self.rooms[from.0],
                        self.rooms[to.0]
                    ))
                })?;
            total = total.saturating_add(self.corridors[link.corridor.0].distance());
        }
        Ok(total)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random tree: room `i` attaches to some earlier room.
    fn tree() -> impl Strategy<Value = Building> {
        prop::collection::vec((any::<prop::sample::Index>(), 0i64..50), 0..40).prop_map(|edges| {
            let mut building = Building::new("r0").unwrap();
            for (i, (parent, distance)) in edges.into_iter().enumerate() {
                let parent = format!("r{}", parent.index(i + 1));
                building.add_room(format!("r{}", i + 1), &parent, distance).unwrap();
            }
            building
        })
    }

    proptest! {
        /// Construction keeps one more room than corridors.
        #[test]
        fn rooms_exceed_corridors_by_one(building in tree()) {
            prop_assert_eq!(building.number_of_rooms(), building.number_of_corridors() + 1);
            prop_assert!(building.validate().is_ok());
        }

        /// Paths are symmetric and walk real corridors.
        #[test]
        fn traversal_is_symmetric(building in tree(), x in any::<prop::sample::Index>(), y in any::<prop::sample::Index>()) {
            let n = building.number_of_rooms();
            let x = building.rooms()[x.index(n)].id().to_string();
            let y = building.rooms()[y.index(n)].id().to_string();

            let forward = building.traversal(&x, &y).unwrap();
            let mut backward = building.traversal(&y, &x).unwrap();
            backward.reverse();
            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(forward[0].id(), x.as_str());
            prop_assert_eq!(forward[forward.len() - 1].id(), y.as_str());
            for pair in forward.windows(2) {
                prop_assert!(pair[0].is_connected_to(pair[1]));
            }

            let distances = building.distances_from(&x).unwrap();
            let to_y = distances.iter().find(|(r, _)| r.id() == y).unwrap().1;
            prop_assert_eq!(building.path_distance(&forward).unwrap(), to_y);
        }

        /// The route starts at `start` and reaches every room, leaves included.
        #[test]
        fn route_covers_every_leaf(building in tree(), start in any::<prop::sample::Index>()) {
            let start = building.rooms()[start.index(building.number_of_rooms())].id().to_string();
            let route = building.shortest_path(&start).unwrap();
            prop_assert_eq!(route[0].id(), start.as_str());
            for room in building.rooms() {
                prop_assert!(route.contains(&room));
            }
            let legs: i64 = building.route_legs(&start).unwrap().iter().map(|l| l.distance).sum();
            prop_assert_eq!(building.path_distance(&route).unwrap(), legs);
        }
    }
}
