//! Loads a `Building` from a CSV building plan.
//!
//! ```text
//! room,connected_to,distance
//! lobby,,
//! hall,lobby,2
//! office,hall,4
//! ```
//!
//! The first row names the first room and leaves the other columns empty;
//! every later row attaches a new room to one listed above it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::building::Building;
use crate::error::{BuildingError, PlanError};

#[derive(Debug, Deserialize)]
struct PlanRow {
    room: String,
    connected_to: Option<String>, // empty on the first row
    distance: Option<i64>,
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Building, PlanError> {
    let file = File::open(path)?;
    read_plan(BufReader::new(file))
}

pub fn read_plan<R: Read>(source: R) -> Result<Building, PlanError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut building: Option<Building> = None;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: PlanRow = record.deserialize(Some(&headers))?;

        match building.as_mut() {
            None => {
                if let Some(id) = row.connected_to {
                    // nothing exists yet to connect to
                    return Err(PlanError::Row {
                        line,
                        source: BuildingError::UnknownConnectionPoint { id },
                    });
                }
                let first = Building::new(row.room).map_err(|source| PlanError::Row { line, source })?;
                building = Some(first);
            }
            Some(building) => {
                let attach_to = row
                    .connected_to
                    .ok_or(BuildingError::NullArgument { what: "connected_to" })
                    .map_err(|source| PlanError::Row { line, source })?;
                let distance = row
                    .distance
                    .ok_or(BuildingError::NullArgument { what: "distance" })
                    .map_err(|source| PlanError::Row { line, source })?;
                building
                    .add_room(row.room, &attach_to, distance)
                    .map_err(|source| PlanError::Row { line, source })?;
            }
        }
    }

    let building = building.ok_or(PlanError::Empty)?;
    building.validate()?;
    tracing::debug!(
        rooms = building.number_of_rooms(),
        corridors = building.number_of_corridors(),
        "building plan loaded"
    );
    Ok(building)
}
