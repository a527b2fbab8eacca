//! This module stores tasks and events in a local JSON file
//!
//! This is the data a planner front-end would have fetched from its API (personal tasks, and events with their tasks),
//! saved in the same JSON shape.

use std::path::Path;
use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::Task;
use crate::Event;
use crate::error::ValidationError;
use crate::validation::{validate_event, validate_task};


/// The tasks and events known at some point in time
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, events: Vec<Event>) -> Self {
        Self { tasks, events }
    }

    /// Initialize a snapshot from the content of a valid backing file.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data: Snapshot = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(std::io::BufReader::new(file))
                .map_err(|err| format!("Invalid snapshot file {:?}: {}", path, err))?,
        };
        Ok(data)
    }

    /// Store this snapshot to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return Err(err.into());
            },
            Ok(f) => f,
        };

        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Run the strict checks on every personal task and every event. The first error wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tasks.iter().try_for_each(validate_task)?;
        self.events.iter().try_for_each(validate_event)
    }

    /// Every task in this snapshot: personal ones first, then the ones owned by each event
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
            .chain(self.events.iter().flat_map(|event| event.tasks().iter()))
    }
}
