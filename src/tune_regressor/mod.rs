pub mod svr;
pub mod tree_regressor;

pub use svr::{
    Gamma, Kernel, LinearSvr, LinearSvrLoss, LinearSvrModel, LinearSvrSpace, NuSvr, NuSvrModel,
    NuSvrSpace, Svr, SvrModel, SvrSpace,
};
pub use tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorModel, ExtraTreeRegressor,
    ExtraTreeRegressorModel, RegressorCriterion, TreeRegressorParams, TreeRegressorSpace,
};

use crate::registry::{get_entities, DefinitionModule, RegistryEntry};

/// Modules whose `entities()` make up the regression families.
///
/// Only regressors are listed. GaussianNB lives in
/// [`tune_classifier`](crate::tune_classifier).
pub const DEFINITION_MODULES: &[DefinitionModule] = &[
    ("tune_regressor::svr", svr::entities),
    ("tune_regressor::tree_regressor", tree_regressor::entities),
];

pub fn tuning_entities() -> Vec<RegistryEntry> {
    get_entities(DEFINITION_MODULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Task;

    #[test]
    fn test_entities_are_regressors() {
        let entities = tuning_entities();
        assert_eq!(entities.len(), 5);
        assert!(entities.iter().all(|e| e.task == Task::Regression));
        assert!(entities.iter().all(|e| e.name != "GaussianNB"));
    }
}
