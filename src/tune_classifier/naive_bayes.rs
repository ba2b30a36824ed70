use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    estimator::{Estimator, Task},
    library::{ModelFamily, SampledParameters, SearchSpace},
    registry::RegistryEntry,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianNb {
    pub var_smoothing: f64,
}

impl Estimator for GaussianNb {
    fn name(&self) -> &'static str {
        GaussianNbModel::NAME
    }

    fn task(&self) -> Task {
        Task::Classification
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianNbSpace {
    /// Sampled on a log scale.
    pub var_smoothing_space: (f64, f64),
}

impl Default for GaussianNbSpace {
    fn default() -> Self {
        Self {
            var_smoothing_space: (1e-10, 1e-6),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaussianNbModel {
    pub space: GaussianNbSpace,
}

impl ModelFamily for GaussianNbModel {
    type Model = GaussianNb;
    const NAME: &'static str = "GaussianNB";
    const TASK: Task = Task::Classification;

    fn describe_space(&self) -> Result<SearchSpace> {
        Ok(SearchSpace::new().add_log_float("var_smoothing", self.space.var_smoothing_space))
    }

    fn build(&self, params: &SampledParameters) -> Result<GaussianNb> {
        let mut reader = params.reader();
        let var_smoothing = reader.next_f64("var_smoothing")?;
        reader.finish()?;
        Ok(GaussianNb { var_smoothing })
    }
}

pub fn entities() -> Vec<RegistryEntry> {
    vec![RegistryEntry::of::<GaussianNbModel>()]
}
