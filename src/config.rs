use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::output::OutputStats;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

pub struct StudyConfig {
    pub(crate) budget: u64,
    pub(crate) seed: Option<u64>,
    pub(crate) direction: Direction,
    pub(crate) save_interval: Option<u32>,
    pub(crate) last_evaluations: Option<OutputStats>,
    pub(crate) allow_different_space: bool,
    pub(crate) allow_different_names: bool,
    pub(crate) path: Option<PathBuf>,
}

impl StudyConfig {
    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

pub struct ConfigBuilder {
    budget: u64,
    seed: Option<u64>,
    direction: Direction,
    save_interval: Option<u32>,
    prior_evaluations: Option<OutputStats>,
    allow_different_space: bool,
    allow_different_names: bool,
    output_path: Option<PathBuf>,
    read_evaluations_from: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new(budget: u64) -> Self {
        ConfigBuilder {
            budget,
            seed: None,
            direction: Direction::Minimize,
            save_interval: None,
            prior_evaluations: None,
            allow_different_space: false,
            allow_different_names: false,
            output_path: None,
            read_evaluations_from: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn save_interval(mut self, interval: u32) -> Self {
        self.save_interval = Some(interval);
        self
    }

    pub fn set_prior_evaluations(mut self, prior_evaluations: OutputStats) -> Self {
        self.prior_evaluations = Some(prior_evaluations);
        self
    }

    pub fn allow_different_space(mut self, allow_different_space: bool) -> Self {
        self.allow_different_space = allow_different_space;
        self
    }

    pub fn allow_different_names(mut self, allow_different_names: bool) -> Self {
        self.allow_different_names = allow_different_names;
        self
    }

    pub fn read_from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_evaluations_from = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn build(self) -> anyhow::Result<StudyConfig> {
        let mut prior_evaluations = self.prior_evaluations;
        if let Some(path) = self.read_evaluations_from {
            prior_evaluations = Some(OutputStats::read_from_file(path)?);
        }
        Ok(StudyConfig {
            budget: self.budget,
            seed: self.seed,
            direction: self.direction,
            save_interval: self.save_interval.filter(|interval| *interval > 0),
            last_evaluations: prior_evaluations,
            allow_different_space: self.allow_different_space,
            allow_different_names: self.allow_different_names,
            path: self.output_path,
        })
    }
}

/// Reads a search-space record from JSON. Ranges left out keep their defaults.
pub fn load_space<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open search space {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse search space {}", path.display()))
}
