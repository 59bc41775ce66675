use crate::data_structs::{AssignmentRow, ScheduleRow};
use std::path::Path;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use serde::de::DeserializeOwned;
use crate::error::*;

/// Scraped rows as committed under `test_data/`.
#[derive(Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub assignments: Vec<AssignmentRow>,
    pub schedule: Vec<ScheduleRow>,
    /// The rows as they would be pasted, for eyeballing the snapshot.
    pub text: Vec<String>
}

impl SaveData {
    pub fn new(assignments: Vec<AssignmentRow>, schedule: Vec<ScheduleRow>) -> Self {
        let text = assignments.iter().map(|r| r.to_string())
                              .chain(schedule.iter().map(|r| r.to_string()))
                              .collect();

        SaveData {
            assignments,
            schedule,
            text
        }
    }

    /// Loads a committed snapshot. A missing file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        load(path).chain_err(|| format!("could not load snapshot {}", path.display()))
    }
}

pub fn load<P, S>(path: P) -> Result<S>
    where P: AsRef<Path>,
          S: DeserializeOwned {

    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut contents = String::new();
    buf_reader.read_to_string(&mut contents)?;

    serde_json::from_str(&contents).chain_err(|| "snapshot is not valid JSON")
}
