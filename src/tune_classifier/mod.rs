pub mod naive_bayes;
pub mod tree_classifier;

pub use naive_bayes::{GaussianNb, GaussianNbModel, GaussianNbSpace};
pub use tree_classifier::{
    ClassWeight, ClassifierCriterion, DecisionTreeClassifier, DecisionTreeClassifierModel,
    ExtraTreeClassifier, ExtraTreeClassifierModel, TreeClassifierParams, TreeClassifierSpace,
};

use crate::registry::{get_entities, DefinitionModule, RegistryEntry};

/// Modules whose `entities()` make up the classification families.
///
/// GaussianNB is registered here, with the other classifiers, so every
/// entry of [`tuning_entities`] has [`Task::Classification`](crate::estimator::Task).
pub const DEFINITION_MODULES: &[DefinitionModule] = &[
    ("tune_classifier::tree_classifier", tree_classifier::entities),
    ("tune_classifier::naive_bayes", naive_bayes::entities),
];

pub fn tuning_entities() -> Vec<RegistryEntry> {
    get_entities(DEFINITION_MODULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Task;

    #[test]
    fn test_entities_are_classifiers() {
        let entities = tuning_entities();
        assert!(entities.iter().any(|e| e.name == "GaussianNB"));
        assert!(entities.iter().all(|e| e.task == Task::Classification));
    }
}
