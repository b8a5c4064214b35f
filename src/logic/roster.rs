//! Team roster import from CSV (`name,coach_name,home_ground`).

use crate::models::Team;
use crate::store::Tables;
use serde::Deserialize;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    coach_name: Option<String>,
    #[serde(default)]
    home_ground: Option<String>,
}

/// Parse teams from CSV with a header row. Empty optional cells become `None`.
pub fn read_roster<R: io::Read>(reader: R) -> Result<Vec<Team>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    rdr.deserialize::<RosterRow>()
        .map(|row| {
            let row = row?;
            Ok(Team::with_details(
                row.name,
                row.coach_name.filter(|s| !s.is_empty()),
                row.home_ground.filter(|s| !s.is_empty()),
            ))
        })
        .collect()
}

pub fn load_roster_file(path: impl AsRef<Path>) -> Result<Vec<Team>, csv::Error> {
    let file = std::fs::File::open(path)?;
    read_roster(file)
}

/// Insert teams, skipping any whose name is taken or blank. Returns how many were added.
pub fn import_roster(tables: &mut Tables, teams: Vec<Team>) -> usize {
    let mut added = 0;
    for team in teams {
        let name = team.name.clone();
        match tables.insert_team(team) {
            Ok(_) => added += 1,
            Err(e) => log::warn!("Skipping roster entry '{}': {}", name, e),
        }
    }
    added
}
