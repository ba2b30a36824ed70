use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    estimator::{Estimator, Keyword, MaxFeatures, Splitter, Task, Threshold},
    library::{Choice, ModelFamily, NumberSpace, SampledParameters, SearchSpace},
    registry::RegistryEntry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierCriterion {
    Gini,
    Entropy,
    LogLoss,
}

impl Keyword for ClassifierCriterion {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "gini" => Some(Self::Gini),
            "entropy" => Some(Self::Entropy),
            "log_loss" => Some(Self::LogLoss),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::Gini => "gini",
            Self::Entropy => "entropy",
            Self::LogLoss => "log_loss",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    Balanced,
}

impl Keyword for ClassWeight {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        "balanced"
    }
}

/// Ranges shared by the decision tree and extra tree classifiers.
///
/// `min_samples_split_space` and `min_samples_leaf_space` are fractions of the
/// samples when both bounds are floats, and counts otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeClassifierSpace {
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
    pub class_weight_space: Vec<Choice>,
}

impl Default for TreeClassifierSpace {
    fn default() -> Self {
        Self {
            criterion_space: vec!["gini".into(), "entropy".into(), "log_loss".into()],
            splitter_space: vec!["best".into(), "random".into()],
            max_depth_space: (2, 1000),
            min_samples_split_space: NumberSpace::floats(1e-4, 1.0),
            min_samples_leaf_space: NumberSpace::floats(1e-4, 1.0),
            min_weight_fraction_leaf_space: (0.0, 0.5),
            max_features_space: vec!["sqrt".into(), "log2".into(), Choice::None],
            max_leaf_nodes_space: (2, 1000),
            min_impurity_decrease_space: (0.0, 1.0),
            ccp_alpha_space: (0.0, 1.0),
            class_weight_space: vec!["balanced".into(), Choice::None],
        }
    }
}

impl TreeClassifierSpace {
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
            .add_float("ccp_alpha", self.ccp_alpha_space)
            .add_categorical("class_weight", &self.class_weight_space))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeClassifierParams {
    pub criterion: ClassifierCriterion,
    pub splitter: Splitter,
    pub max_depth: i64,
    pub min_samples_split: Threshold,
    pub min_samples_leaf: Threshold,
    pub min_weight_fraction_leaf: f64,
    pub max_features: Option<MaxFeatures>,
    pub max_leaf_nodes: i64,
    pub min_impurity_decrease: f64,
    pub ccp_alpha: f64,
    pub class_weight: Option<ClassWeight>,
}

impl TreeClassifierParams {
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
            class_weight: reader.next_keyword("class_weight")?,
        };
        reader.finish()?;
        Ok(built)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    pub params: TreeClassifierParams,
}

impl Estimator for DecisionTreeClassifier {
    fn name(&self) -> &'static str {
        DecisionTreeClassifierModel::NAME
    }

    fn task(&self) -> Task {
        Task::Classification
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtraTreeClassifier {
    pub params: TreeClassifierParams,
}

impl Estimator for ExtraTreeClassifier {
    fn name(&self) -> &'static str {
        ExtraTreeClassifierModel::NAME
    }

    fn task(&self) -> Task {
        Task::Classification
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTreeClassifierModel {
    pub space: TreeClassifierSpace,
}

impl ModelFamily for DecisionTreeClassifierModel {
    type Model = DecisionTreeClassifier;
    const NAME: &'static str = "DecisionTreeClassifier";
    const TASK: Task = Task::Classification;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<DecisionTreeClassifier> {
        TreeClassifierParams::from_params(params).map(|params| DecisionTreeClassifier { params })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraTreeClassifierModel {
    pub space: TreeClassifierSpace,
}

impl ModelFamily for ExtraTreeClassifierModel {
    type Model = ExtraTreeClassifier;
    const NAME: &'static str = "ExtraTreeClassifier";
    const TASK: Task = Task::Classification;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<ExtraTreeClassifier> {
        TreeClassifierParams::from_params(params).map(|params| ExtraTreeClassifier { params })
    }
}

pub fn entities() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::of::<DecisionTreeClassifierModel>(),
        RegistryEntry::of::<ExtraTreeClassifierModel>(),
    ]
}
