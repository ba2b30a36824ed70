//! Discovery of every tunable model family in the crate.

use std::fmt;

use crate::{
    errors::Result,
    estimator::{Estimator, Task},
    library::{ModelFamily, Sampler, SearchSpace},
    trials::Trial,
    tune_classifier, tune_regressor,
};

/// A sampler with its model family erased.
pub trait DynSampler {
    fn name(&self) -> &'static str;
    fn task(&self) -> Task;
    fn search_space(&self) -> Result<SearchSpace>;
    fn sample_estimator(&mut self, trial: &mut dyn Trial) -> Result<Box<dyn Estimator>>;
}

impl<F> DynSampler for Sampler<F>
where
    F: ModelFamily,
    F::Model: 'static,
{
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn task(&self) -> Task {
        F::TASK
    }

    fn search_space(&self) -> Result<SearchSpace> {
        self.family().describe_space()
    }

    fn sample_estimator(&mut self, trial: &mut dyn Trial) -> Result<Box<dyn Estimator>> {
        let model = self.sample_model(Some(trial))?;
        Ok(Box::new(model))
    }
}

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub task: Task,
    factory: fn() -> Box<dyn DynSampler>,
}

impl RegistryEntry {
    pub fn of<F>() -> Self
    where
        F: ModelFamily + Default + 'static,
        F::Model: 'static,
    {
        Self {
            name: F::NAME,
            task: F::TASK,
            factory: default_sampler::<F>,
        }
    }

    /// A fresh sampler over the family's default space.
    pub fn sampler(&self) -> Box<dyn DynSampler> {
        (self.factory)()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("task", &self.task)
            .finish()
    }
}

fn default_sampler<F>() -> Box<dyn DynSampler>
where
    F: ModelFamily + Default + 'static,
    F::Model: 'static,
{
    Box::new(Sampler::new(F::default()))
}

/// A definition module and the function listing its families.
pub type DefinitionModule = (&'static str, fn() -> Vec<RegistryEntry>);

pub(crate) fn get_entities(modules: &[DefinitionModule]) -> Vec<RegistryEntry> {
    itertools::concat(modules.iter().map(|(_, entities)| entities()))
}

/// Every family of both packages, keyed by name.
pub fn tuning_entities() -> Vec<(&'static str, RegistryEntry)> {
    tune_classifier::tuning_entities()
        .into_iter()
        .chain(tune_regressor::tuning_entities())
        .map(|entry| (entry.name, entry))
        .collect()
}

pub fn find(name: &str) -> Option<RegistryEntry> {
    tuning_entities()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, entry)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trials::random_trial::RandomTrial;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_count_matches_definition_modules() {
        let expected: usize = tune_classifier::DEFINITION_MODULES
            .iter()
            .chain(tune_regressor::DEFINITION_MODULES.iter())
            .map(|(_, entities)| entities().len())
            .sum();
        assert_eq!(tuning_entities().len(), expected);
    }

    #[test]
    fn test_names_are_unique() {
        let entities = tuning_entities();
        let unique = entities.iter().map(|(name, _)| name).unique().count();
        assert_eq!(unique, entities.len());
    }

    #[test]
    fn test_every_entry_samples() {
        for (index, (name, entry)) in tuning_entities().into_iter().enumerate() {
            let mut sampler = entry.sampler();
            assert_eq!(sampler.name(), name);
            assert_eq!(sampler.task(), entry.task);

            let space = sampler.search_space().unwrap();
            let mut trial = RandomTrial::new_with_rng(index, StdRng::seed_from_u64(index as u64));
            let estimator = sampler.sample_estimator(&mut trial).unwrap();
            assert_eq!(estimator.name(), name);
            assert_eq!(estimator.task(), entry.task);
            assert_eq!(trial.params().len(), space.len());
            for (field, domain) in space.iter() {
                let value = trial.params().get(field).unwrap();
                assert!(domain.contains(value), "{}: {} not in {:?}", field, value, domain);
            }
        }
    }

    #[test]
    fn test_find() {
        let entry = find("SVR").unwrap();
        assert_eq!(entry.task, Task::Regression);
        assert!(find("KNeighborsClassifier").is_none());
    }
}
