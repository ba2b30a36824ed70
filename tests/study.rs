use hyper_tuner::config::{load_space, ConfigBuilder, Direction};
use hyper_tuner::estimator::{Task, Threshold};
use hyper_tuner::library::{ModelFamily, NumberSpace, Sampler};
use hyper_tuner::output::OutputStats;
use hyper_tuner::registry::{find, tuning_entities, DynSampler};
use hyper_tuner::runner::Study;
use hyper_tuner::trials::{random_trial::RandomTrial, Trial};
use hyper_tuner::tune_regressor::{DecisionTreeRegressor, DecisionTreeRegressorModel};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn registry_lists_both_packages() {
    let entities = tuning_entities();
    let names: Vec<&str> = entities.iter().map(|(name, _)| *name).collect();
    for expected in [
        "DecisionTreeClassifier",
        "ExtraTreeClassifier",
        "GaussianNB",
        "SVR",
        "NuSVR",
        "LinearSVR",
        "DecisionTreeRegressor",
        "ExtraTreeRegressor",
    ] {
        assert!(names.contains(&expected), "{} is not registered", expected);
    }
    assert_eq!(find("GaussianNB").unwrap().task, Task::Classification);
}

#[test]
fn registry_samplers_are_independent() {
    let entry = find("DecisionTreeRegressor").unwrap();
    let mut first = entry.sampler();
    let mut second = entry.sampler();
    let mut trial_a = RandomTrial::new_with_rng(0, StdRng::seed_from_u64(1));
    let mut trial_b = RandomTrial::new_with_rng(1, StdRng::seed_from_u64(1));
    let a = first.sample_estimator(&mut trial_a).unwrap();
    let b = second.sample_estimator(&mut trial_b).unwrap();
    assert_eq!(format!("{:?}", a), format!("{:?}", b));
    assert_eq!(trial_a.params(), trial_b.params());
}

#[test]
fn study_from_json_space() {
    let dir = tempfile::tempdir().unwrap();
    let space_path = dir.path().join("space.json");
    std::fs::write(
        &space_path,
        r#"{"min_samples_leaf_space": [1, 16], "criterion_space": ["squared_error"]}"#,
    )
    .unwrap();
    let family: DecisionTreeRegressorModel = load_space(&space_path).unwrap();
    assert_eq!(family.space.min_samples_leaf_space, NumberSpace::ints(1, 16));

    let objective = |model: &DecisionTreeRegressor| match model.params.min_samples_leaf {
        Threshold::Count(v) => v as f64,
        Threshold::Fraction(v) => v,
    };
    let stats_path = dir.path().join("stats.json");
    let config = ConfigBuilder::new(12)
        .seed(5)
        .direction(Direction::Maximize)
        .output(&stats_path)
        .build()
        .unwrap();
    let mut study = Study::new(family, objective);
    let result = study.optimize(config).unwrap();

    assert!(matches!(
        result.best_model.params.min_samples_leaf,
        Threshold::Count(v) if (1..=16).contains(&v)
    ));
    let saved = OutputStats::read_from_file(&stats_path).unwrap();
    assert_eq!(saved, result.stats);
    assert_eq!(saved.model, DecisionTreeRegressorModel::NAME);
}

#[test]
fn sampler_without_trial_fails() {
    let mut sampler = Sampler::new(DecisionTreeRegressorModel::default());
    assert!(sampler.sample_model(None::<&mut RandomTrial>).is_err());
}
