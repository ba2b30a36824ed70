use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::Direction;
use crate::library::{SampledParameters, SearchSpace};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputStats {
    pub model: String,
    pub space: SearchSpace,
    pub evaluations: Vec<Evaluation>,
}

impl OutputStats {
    pub fn new(model: &str, space: SearchSpace) -> Self {
        Self {
            model: model.to_string(),
            space,
            evaluations: Vec::new(),
        }
    }

    pub fn best(&self, direction: Direction) -> Option<&Evaluation> {
        let evaluations = self.evaluations.iter();
        match direction {
            Direction::Minimize => evaluations.min_by(|a, b| a.output.total_cmp(&b.output)),
            Direction::Maximize => evaluations.max_by(|a, b| a.output.total_cmp(&b.output)),
        }
    }

    /// Best evaluation whose params still fall inside `self.space`.
    pub fn best_in_space(&self, direction: Direction) -> Option<&Evaluation> {
        let evaluations = self
            .evaluations
            .iter()
            .filter(|e| self.space.covers(&e.params));
        match direction {
            Direction::Minimize => evaluations.min_by(|a, b| a.output.total_cmp(&b.output)),
            Direction::Maximize => evaluations.max_by(|a, b| a.output.total_cmp(&b.output)),
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let writer = File::options()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::to_writer_pretty(writer, self)
            .with_context(|| format!("Failed to write stats to {}", path.display()))
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read stats from {}", path.display()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub number: usize,
    pub params: SampledParameters,
    pub output: f64,
}
