use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    estimator::{Estimator, Keyword, MaxFeatures, Splitter, Task, Threshold},
    library::{Choice, ModelFamily, NumberSpace, SampledParameters, SearchSpace},
    registry::RegistryEntry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressorCriterion {
    SquaredError,
    FriedmanMse,
    AbsoluteError,
    Poisson,
}

impl Keyword for RegressorCriterion {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "squared_error" => Some(Self::SquaredError),
            "friedman_mse" => Some(Self::FriedmanMse),
            "absolute_error" => Some(Self::AbsoluteError),
            "poisson" => Some(Self::Poisson),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::SquaredError => "squared_error",
            Self::FriedmanMse => "friedman_mse",
            Self::AbsoluteError => "absolute_error",
            Self::Poisson => "poisson",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeRegressorSpace {
    pub criterion_space: Vec<Choice>,
    pub splitter_space: Vec<Choice>,
    pub max_depth_space: (i64, i64),
    pub min_samples_split_space: NumberSpace,
    pub min_samples_leaf_space: NumberSpace,
    pub min_weight_fraction_leaf_space: (f64, f64),
    pub max_features_space: Vec<Choice>,
    pub max_leaf_nodes_space: (i64, i64),
    pub min_impurity_decrease_space: (f64, f64),
    pub ccp_alpha_space: (f64, f64),
}

impl Default for TreeRegressorSpace {
    fn default() -> Self {
        Self {
            criterion_space: vec![
                "squared_error".into(),
                "friedman_mse".into(),
                "absolute_error".into(),
                "poisson".into(),
            ],
            splitter_space: vec!["best".into(), "random".into()],
            max_depth_space: (2, 1000),
            min_samples_split_space: NumberSpace::floats(1e-4, 1.0),
            min_samples_leaf_space: NumberSpace::floats(1e-4, 1.0),
            min_weight_fraction_leaf_space: (0.0, 0.5),
            max_features_space: vec!["sqrt".into(), "log2".into(), Choice::None],
            max_leaf_nodes_space: (2, 1000),
            min_impurity_decrease_space: (0.0, 1.0),
            ccp_alpha_space: (0.0, 1.0),
        }
    }
}

impl TreeRegressorSpace {
    fn describe(&self) -> Result<SearchSpace> {
        Ok(SearchSpace::new()
            .add_categorical("criterion", &self.criterion_space)
            .add_categorical("splitter", &self.splitter_space)
            .add_int("max_depth", self.max_depth_space)
            .add_number("min_samples_split", &self.min_samples_split_space)?
            .add_number("min_samples_leaf", &self.min_samples_leaf_space)?
            .add_float(
                "min_weight_fraction_leaf",
                self.min_weight_fraction_leaf_space,
            )
            .add_categorical("max_features", &self.max_features_space)
            .add_int("max_leaf_nodes", self.max_leaf_nodes_space)
            .add_float("min_impurity_decrease", self.min_impurity_decrease_space)
            .add_float("ccp_alpha", self.ccp_alpha_space))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeRegressorParams {
    pub criterion: RegressorCriterion,
    pub splitter: Splitter,
    pub max_depth: i64,
    pub min_samples_split: Threshold,
    pub min_samples_leaf: Threshold,
    pub min_weight_fraction_leaf: f64,
    pub max_features: Option<MaxFeatures>,
    pub max_leaf_nodes: i64,
    pub min_impurity_decrease: f64,
    pub ccp_alpha: f64,
}

impl TreeRegressorParams {
    fn from_params(params: &SampledParameters) -> Result<Self> {
        let mut reader = params.reader();
        let built = Self {
            criterion: reader.next_required_keyword("criterion")?,
            splitter: reader.next_required_keyword("splitter")?,
            max_depth: reader.next_i64("max_depth")?,
            min_samples_split: reader.next_threshold("min_samples_split")?,
            min_samples_leaf: reader.next_threshold("min_samples_leaf")?,
            min_weight_fraction_leaf: reader.next_f64("min_weight_fraction_leaf")?,
            max_features: reader.next_keyword("max_features")?,
            max_leaf_nodes: reader.next_i64("max_leaf_nodes")?,
            min_impurity_decrease: reader.next_f64("min_impurity_decrease")?,
            ccp_alpha: reader.next_f64("ccp_alpha")?,
        };
        reader.finish()?;
        Ok(built)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    pub params: TreeRegressorParams,
}

impl Estimator for DecisionTreeRegressor {
    fn name(&self) -> &'static str {
        DecisionTreeRegressorModel::NAME
    }

    fn task(&self) -> Task {
        Task::Regression
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtraTreeRegressor {
    pub params: TreeRegressorParams,
}

impl Estimator for ExtraTreeRegressor {
    fn name(&self) -> &'static str {
        ExtraTreeRegressorModel::NAME
    }

    fn task(&self) -> Task {
        Task::Regression
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTreeRegressorModel {
    pub space: TreeRegressorSpace,
}

impl ModelFamily for DecisionTreeRegressorModel {
    type Model = DecisionTreeRegressor;
    const NAME: &'static str = "DecisionTreeRegressor";
    const TASK: Task = Task::Regression;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<DecisionTreeRegressor> {
        TreeRegressorParams::from_params(params).map(|params| DecisionTreeRegressor { params })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraTreeRegressorModel {
    pub space: TreeRegressorSpace,
}

impl ModelFamily for ExtraTreeRegressorModel {
    type Model = ExtraTreeRegressor;
    const NAME: &'static str = "ExtraTreeRegressor";
    const TASK: Task = Task::Regression;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<ExtraTreeRegressor> {
        TreeRegressorParams::from_params(params).map(|params| ExtraTreeRegressor { params })
    }
}

pub fn entities() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::of::<DecisionTreeRegressorModel>(),
        RegistryEntry::of::<ExtraTreeRegressorModel>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::library::{Domain, Number, Sampler, Value};
    use crate::trials::fixed_trial::FixedTrial;
    use crate::trials::{random_trial::RandomTrial, Trial};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_regressor_space_has_no_class_weight() {
        let space = ExtraTreeRegressorModel::default().describe_space().unwrap();
        assert_eq!(space.len(), 10);
        assert!(space.get("class_weight").is_none());
    }

    #[test]
    fn test_mixed_leaf_space_is_discrete() {
        let mut family = DecisionTreeRegressorModel::default();
        family.space.min_samples_leaf_space = NumberSpace(vec![Number::Int(1), Number::Float(8.0)]);
        let space = family.describe_space().unwrap();
        assert_eq!(
            space.get("min_samples_leaf"),
            Some(&Domain::Discrete {
                low: 1,
                high: 8,
                log: false
            })
        );

        family.space.min_samples_leaf_space =
            NumberSpace(vec![Number::Int(1), Number::Float(0.5)]);
        assert!(matches!(
            family.describe_space(),
            Err(Error::AmbiguousSpace { .. })
        ));
    }

    #[test]
    fn test_criterion_membership() {
        let family = DecisionTreeRegressorModel::default();
        let mut sampler = Sampler::new(family.clone());
        for seed in 0..30 {
            let mut trial = RandomTrial::new_with_rng(0, StdRng::seed_from_u64(seed));
            let model = sampler.sample_model(Some(&mut trial)).unwrap();
            let criterion = Choice::from(model.params.criterion.as_keyword());
            assert!(family.space.criterion_space.contains(&criterion));
            assert_eq!(
                trial.params().get("criterion"),
                Some(&Value::Categorical(criterion))
            );
        }
    }

    #[test]
    fn test_fixed_params_round_trip_json() {
        let mut sampler = Sampler::new(ExtraTreeRegressorModel::default());
        let mut trial = RandomTrial::new_with_rng(0, StdRng::seed_from_u64(9));
        let model = sampler.sample_model(Some(&mut trial)).unwrap();

        let json = serde_json::to_string(trial.params()).unwrap();
        let mut replay = FixedTrial::new(serde_json::from_str(&json).unwrap());
        assert_eq!(sampler.sample_model(Some(&mut replay)).unwrap(), model);
    }
}
