use anyhow::{bail, Context};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::StudyConfig;
use crate::library::{ModelFamily, SampledParameters, Sampler};
use crate::output::{Evaluation, OutputStats};
use crate::trials::{fixed_trial::FixedTrial, random_trial::RandomTrial, Trial};

/// Scores a constructed model. Fitting and scoring happen here.
pub trait Objective<M> {
    fn evaluate(&self, model: &M) -> f64;
}

impl<T, M> Objective<M> for T
where
    T: Fn(&M) -> f64,
{
    fn evaluate(&self, model: &M) -> f64 {
        self(model)
    }
}

pub struct StudyResult<M> {
    pub best_params: SampledParameters,
    pub best_output: f64,
    pub best_model: M,
    pub stats: OutputStats,
}

/// Runs independent random trials of one model family against an objective.
pub struct Study<F: ModelFamily, O: Objective<F::Model>> {
    sampler: Sampler<F>,
    objective: O,
}

impl<F: ModelFamily, O: Objective<F::Model>> Study<F, O> {
    pub fn new(family: F, objective: O) -> Self {
        Self {
            sampler: Sampler::new(family),
            objective,
        }
    }

    pub fn sampler(&self) -> &Sampler<F> {
        &self.sampler
    }

    pub fn optimize(&mut self, config: StudyConfig) -> anyhow::Result<StudyResult<F::Model>> {
        let space = self.sampler.family().describe_space()?;
        if let Some(ref last_stats) = config.last_evaluations {
            if last_stats.space.len() != space.len() {
                bail!(
                    "Prior evaluations have {} parameters. {} declares {}",
                    last_stats.space.len(),
                    F::NAME,
                    space.len()
                );
            }
            if last_stats.space.domains() != space.domains() {
                if !config.allow_different_space {
                    bail!("The domains are different!");
                }
                log::warn!("Resuming {} from prior evaluations over different domains", F::NAME);
            }
            if last_stats.space.field_names() != space.field_names()
                || last_stats.model != F::NAME
            {
                if !config.allow_different_names {
                    bail!("The field names are different!");
                }
                log::warn!("Resuming {} from prior evaluations of {}", F::NAME, last_stats.model);
            }
        }

        let mut stats = OutputStats::new(F::NAME, space);
        stats.evaluations.extend(
            config
                .last_evaluations
                .iter()
                .flat_map(|e| e.evaluations.iter().cloned()),
        );
        let offset = stats.evaluations.len();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for index in 0..config.budget {
            let mut trial = RandomTrial::new_with_rng(offset + index as usize, &mut rng);
            let model = self
                .sampler
                .sample_model(Some(&mut trial))
                .with_context(|| format!("Trial {} of {} failed", trial.number(), F::NAME))?;
            let output = self.objective.evaluate(&model);
            log::debug!("Trial evaluated {}/{}", index + 1, config.budget);
            stats.evaluations.push(Evaluation {
                number: trial.number(),
                params: trial.into_params(),
                output,
            });
            if let (Some(interval), Some(path)) = (config.save_interval, &config.path) {
                if (index + 1) % interval as u64 == 0 {
                    stats.write_to_file(path)?;
                }
            }
        }

        let best = stats
            .best_in_space(config.direction)
            .cloned()
            .context("No evaluations inside the current space to pick the best trial from")?;
        let mut replay = FixedTrial::new_with_number(best.number, best.params.clone());
        let best_model = self
            .sampler
            .sample_model(Some(&mut replay))
            .with_context(|| format!("Failed to rebuild trial {}", best.number))?;
        if let Some(ref path) = config.path {
            stats.write_to_file(path)?;
        }
        log::info!(
            "{} finished after {} trials. Best value {} at trial {}",
            F::NAME,
            stats.evaluations.len(),
            best.output,
            best.number
        );
        Ok(StudyResult {
            best_params: best.params,
            best_output: best.output,
            best_model,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, Direction};
    use crate::tune_classifier::{DecisionTreeClassifier, DecisionTreeClassifierModel};
    use crate::tune_regressor::{Svr, SvrModel};

    fn ccp_alpha(model: &DecisionTreeClassifier) -> f64 {
        model.params.ccp_alpha
    }

    fn deepest(model: &DecisionTreeClassifier) -> f64 {
        -(model.params.max_depth as f64)
    }

    #[test]
    fn test_minimize_picks_lowest_output() {
        let mut study = Study::new(DecisionTreeClassifierModel::default(), ccp_alpha);
        let config = ConfigBuilder::new(20).seed(3).build().unwrap();
        let result = study.optimize(config).unwrap();

        assert_eq!(result.stats.evaluations.len(), 20);
        let lowest = result
            .stats
            .evaluations
            .iter()
            .map(|e| e.output)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_output, lowest);
        assert_eq!(result.best_model.params.ccp_alpha, lowest);
        assert_eq!(study.sampler().model(), Some(&result.best_model));
    }

    #[test]
    fn test_maximize_picks_highest_output() {
        let objective = |svr: &Svr| svr.degree as f64;
        let mut study = Study::new(SvrModel::default(), objective);
        let config = ConfigBuilder::new(30)
            .seed(8)
            .direction(Direction::Maximize)
            .build()
            .unwrap();
        let result = study.optimize(config).unwrap();
        let highest = result
            .stats
            .evaluations
            .iter()
            .map(|e| e.output)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_output, highest);
        assert_eq!(result.best_model.degree as f64, highest);
    }

    #[test]
    fn test_same_seed_same_trials() {
        let run = || {
            let mut study = Study::new(DecisionTreeClassifierModel::default(), ccp_alpha);
            let config = ConfigBuilder::new(5).seed(42).build().unwrap();
            study.optimize(config).unwrap().stats
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zero_budget_without_prior_fails() {
        let mut study = Study::new(DecisionTreeClassifierModel::default(), ccp_alpha);
        let config = ConfigBuilder::new(0).build().unwrap();
        assert!(study.optimize(config).is_err());
    }

    #[test]
    fn test_resume_from_saved_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut study = Study::new(DecisionTreeClassifierModel::default(), ccp_alpha);
        let config = ConfigBuilder::new(4)
            .seed(1)
            .save_interval(2)
            .output(&path)
            .build()
            .unwrap();
        let first = study.optimize(config).unwrap();

        let config = ConfigBuilder::new(3)
            .seed(2)
            .read_from_file(&path)
            .build()
            .unwrap();
        let second = study.optimize(config).unwrap();
        assert_eq!(second.stats.evaluations.len(), 7);
        assert_eq!(
            &second.stats.evaluations[..4],
            &first.stats.evaluations[..]
        );
        let numbers: Vec<usize> = second.stats.evaluations.iter().map(|e| e.number).collect();
        assert_eq!(numbers, (0..7).collect::<Vec<_>>());
        assert!(second.best_output <= first.best_output);
    }

    #[test]
    fn test_prior_with_different_space_is_rejected() {
        let mut family = DecisionTreeClassifierModel::default();
        family.space.max_depth_space = (2, 10);
        let mut narrow = Study::new(family, ccp_alpha);
        let prior = narrow
            .optimize(ConfigBuilder::new(2).seed(0).build().unwrap())
            .unwrap()
            .stats;

        let mut study = Study::new(DecisionTreeClassifierModel::default(), ccp_alpha);
        let config = ConfigBuilder::new(2)
            .set_prior_evaluations(prior.clone())
            .build()
            .unwrap();
        assert!(study.optimize(config).is_err());

        let config = ConfigBuilder::new(2)
            .seed(0)
            .set_prior_evaluations(prior)
            .allow_different_space(true)
            .build()
            .unwrap();
        assert_eq!(study.optimize(config).unwrap().stats.evaluations.len(), 4);
    }

    #[test]
    fn test_narrower_space_resumes_from_wider_prior() {
        let mut wide = Study::new(DecisionTreeClassifierModel::default(), deepest);
        let prior = wide
            .optimize(ConfigBuilder::new(5).seed(0).build().unwrap())
            .unwrap()
            .stats;
        assert!(prior.evaluations.iter().any(|e| e.output < -10.));

        let mut family = DecisionTreeClassifierModel::default();
        family.space.max_depth_space = (2, 10);
        let mut narrow = Study::new(family, deepest);
        let config = ConfigBuilder::new(3)
            .seed(1)
            .set_prior_evaluations(prior)
            .allow_different_space(true)
            .build()
            .unwrap();
        let result = narrow.optimize(config).unwrap();
        assert_eq!(result.stats.evaluations.len(), 8);
        assert!(result.best_model.params.max_depth <= 10);
        assert!(result.stats.space.covers(&result.best_params));
    }
}
