use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    estimator::{Estimator, Keyword, Task},
    library::{Choice, ModelFamily, SampledParameters, SearchSpace},
    registry::RegistryEntry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Poly,
    Rbf,
    Sigmoid,
}

impl Keyword for Kernel {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "linear" => Some(Self::Linear),
            "poly" => Some(Self::Poly),
            "rbf" => Some(Self::Rbf),
            "sigmoid" => Some(Self::Sigmoid),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Poly => "poly",
            Self::Rbf => "rbf",
            Self::Sigmoid => "sigmoid",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gamma {
    Scale,
    Auto,
}

impl Keyword for Gamma {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "scale" => Some(Self::Scale),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Auto => "auto",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSvrLoss {
    EpsilonInsensitive,
    SquaredEpsilonInsensitive,
}

impl Keyword for LinearSvrLoss {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "epsilon_insensitive" => Some(Self::EpsilonInsensitive),
            "squared_epsilon_insensitive" => Some(Self::SquaredEpsilonInsensitive),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::EpsilonInsensitive => "epsilon_insensitive",
            Self::SquaredEpsilonInsensitive => "squared_epsilon_insensitive",
        }
    }
}

fn kernel_choices() -> Vec<Choice> {
    vec!["linear".into(), "poly".into(), "rbf".into(), "sigmoid".into()]
}

fn gamma_choices() -> Vec<Choice> {
    vec!["scale".into(), "auto".into()]
}

fn flag_choices() -> Vec<Choice> {
    vec![true.into(), false.into()]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Svr {
    pub kernel: Kernel,
    pub degree: i64,
    pub gamma: Gamma,
    pub coef0: f64,
    pub tol: f64,
    pub c: f64,
    pub epsilon: f64,
    pub shrinking: bool,
    pub max_iter: i64,
}

impl Estimator for Svr {
    fn name(&self) -> &'static str {
        SvrModel::NAME
    }

    fn task(&self) -> Task {
        Task::Regression
    }
}

/// Ranges for [`Svr`]. `C_space` keeps the keyword's capital letter in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvrSpace {
    pub kernel_space: Vec<Choice>,
    pub degree_space: (i64, i64),
    pub gamma_space: Vec<Choice>,
    pub coef0_space: (f64, f64),
    pub tol_space: (f64, f64),
    #[serde(rename = "C_space")]
    pub c_space: (f64, f64),
    pub epsilon_space: (f64, f64),
    pub shrinking_space: Vec<Choice>,
    pub max_iter_space: (i64, i64),
}

impl Default for SvrSpace {
    fn default() -> Self {
        Self {
            kernel_space: kernel_choices(),
            degree_space: (1, 5),
            gamma_space: gamma_choices(),
            coef0_space: (0.0, 0.5),
            tol_space: (1e-6, 1e-3),
            c_space: (0.9, 1.0),
            epsilon_space: (0.1, 0.5),
            shrinking_space: flag_choices(),
            max_iter_space: (100, 1000),
        }
    }
}

impl SvrSpace {
    fn describe(&self) -> Result<SearchSpace> {
        Ok(SearchSpace::new()
            .add_categorical("kernel", &self.kernel_space)
            .add_int("degree", self.degree_space)
            .add_categorical("gamma", &self.gamma_space)
            .add_float("coef0", self.coef0_space)
            .add_float("tol", self.tol_space)
            .add_float("C", self.c_space)
            .add_float("epsilon", self.epsilon_space)
            .add_categorical("shrinking", &self.shrinking_space)
            .add_int("max_iter", self.max_iter_space))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SvrModel {
    pub space: SvrSpace,
}

impl ModelFamily for SvrModel {
    type Model = Svr;
    const NAME: &'static str = "SVR";
    const TASK: Task = Task::Regression;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<Svr> {
        let mut reader = params.reader();
        let svr = Svr {
            kernel: reader.next_required_keyword("kernel")?,
            degree: reader.next_i64("degree")?,
            gamma: reader.next_required_keyword("gamma")?,
            coef0: reader.next_f64("coef0")?,
            tol: reader.next_f64("tol")?,
            c: reader.next_f64("C")?,
            epsilon: reader.next_f64("epsilon")?,
            shrinking: reader.next_bool("shrinking")?,
            max_iter: reader.next_i64("max_iter")?,
        };
        reader.finish()?;
        Ok(svr)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NuSvr {
    pub nu: f64,
    pub c: f64,
    pub kernel: Kernel,
    pub degree: i64,
    pub gamma: Gamma,
    pub coef0: f64,
    pub shrinking: bool,
    pub tol: f64,
    pub max_iter: i64,
}

impl Estimator for NuSvr {
    fn name(&self) -> &'static str {
        NuSvrModel::NAME
    }

    fn task(&self) -> Task {
        Task::Regression
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NuSvrSpace {
    pub nu_space: (f64, f64),
    #[serde(rename = "C_space")]
    pub c_space: (f64, f64),
    pub kernel_space: Vec<Choice>,
    pub degree_space: (i64, i64),
    pub gamma_space: Vec<Choice>,
    pub coef0_space: (f64, f64),
    pub shrinking_space: Vec<Choice>,
    pub tol_space: (f64, f64),
    pub max_iter_space: (i64, i64),
}

impl Default for NuSvrSpace {
    fn default() -> Self {
        Self {
            nu_space: (0.1, 1.0),
            c_space: (0.9, 1.0),
            kernel_space: kernel_choices(),
            degree_space: (1, 5),
            gamma_space: gamma_choices(),
            coef0_space: (0.0, 0.5),
            shrinking_space: flag_choices(),
            tol_space: (1e-6, 1e-3),
            max_iter_space: (100, 1000),
        }
    }
}

impl NuSvrSpace {
    fn describe(&self) -> Result<SearchSpace> {
        Ok(SearchSpace::new()
            .add_float("nu", self.nu_space)
            .add_float("C", self.c_space)
            .add_categorical("kernel", &self.kernel_space)
            .add_int("degree", self.degree_space)
            .add_categorical("gamma", &self.gamma_space)
            .add_float("coef0", self.coef0_space)
            .add_categorical("shrinking", &self.shrinking_space)
            .add_float("tol", self.tol_space)
            .add_int("max_iter", self.max_iter_space))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NuSvrModel {
    pub space: NuSvrSpace,
}

impl ModelFamily for NuSvrModel {
    type Model = NuSvr;
    const NAME: &'static str = "NuSVR";
    const TASK: Task = Task::Regression;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<NuSvr> {
        let mut reader = params.reader();
        let nu_svr = NuSvr {
            nu: reader.next_f64("nu")?,
            c: reader.next_f64("C")?,
            kernel: reader.next_required_keyword("kernel")?,
            degree: reader.next_i64("degree")?,
            gamma: reader.next_required_keyword("gamma")?,
            coef0: reader.next_f64("coef0")?,
            shrinking: reader.next_bool("shrinking")?,
            tol: reader.next_f64("tol")?,
            max_iter: reader.next_i64("max_iter")?,
        };
        reader.finish()?;
        Ok(nu_svr)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearSvr {
    pub epsilon: f64,
    pub tol: f64,
    pub c: f64,
    pub loss: LinearSvrLoss,
    pub fit_intercept: bool,
    pub intercept_scaling: f64,
    pub dual: bool,
    pub max_iter: i64,
}

impl Estimator for LinearSvr {
    fn name(&self) -> &'static str {
        LinearSvrModel::NAME
    }

    fn task(&self) -> Task {
        Task::Regression
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearSvrSpace {
    pub epsilon_space: (f64, f64),
    pub tol_space: (f64, f64),
    #[serde(rename = "C_space")]
    pub c_space: (f64, f64),
    pub loss_space: Vec<Choice>,
    pub fit_intercept_space: Vec<Choice>,
    pub intercept_scaling_space: (f64, f64),
    pub dual_space: Vec<Choice>,
    pub max_iter_space: (i64, i64),
}

impl Default for LinearSvrSpace {
    fn default() -> Self {
        Self {
            epsilon_space: (0.0, 0.5),
            tol_space: (1e-5, 1e-3),
            c_space: (0.9, 1.0),
            loss_space: vec![
                "epsilon_insensitive".into(),
                "squared_epsilon_insensitive".into(),
            ],
            fit_intercept_space: flag_choices(),
            intercept_scaling_space: (1.0, 5.0),
            dual_space: flag_choices(),
            max_iter_space: (500, 2000),
        }
    }
}

impl LinearSvrSpace {
    fn describe(&self) -> Result<SearchSpace> {
        Ok(SearchSpace::new()
            .add_float("epsilon", self.epsilon_space)
            .add_float("tol", self.tol_space)
            .add_float("C", self.c_space)
            .add_categorical("loss", &self.loss_space)
            .add_categorical("fit_intercept", &self.fit_intercept_space)
            .add_float("intercept_scaling", self.intercept_scaling_space)
            .add_categorical("dual", &self.dual_space)
            .add_int("max_iter", self.max_iter_space))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearSvrModel {
    pub space: LinearSvrSpace,
}

impl ModelFamily for LinearSvrModel {
    type Model = LinearSvr;
    const NAME: &'static str = "LinearSVR";
    const TASK: Task = Task::Regression;

    fn describe_space(&self) -> Result<SearchSpace> {
        self.space.describe()
    }

    fn build(&self, params: &SampledParameters) -> Result<LinearSvr> {
        let mut reader = params.reader();
        let linear_svr = LinearSvr {
            epsilon: reader.next_f64("epsilon")?,
            tol: reader.next_f64("tol")?,
            c: reader.next_f64("C")?,
            loss: reader.next_required_keyword("loss")?,
            fit_intercept: reader.next_bool("fit_intercept")?,
            intercept_scaling: reader.next_f64("intercept_scaling")?,
            dual: reader.next_bool("dual")?,
            max_iter: reader.next_i64("max_iter")?,
        };
        reader.finish()?;
        Ok(linear_svr)
    }
}

pub fn entities() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::of::<SvrModel>(),
        RegistryEntry::of::<NuSvrModel>(),
        RegistryEntry::of::<LinearSvrModel>(),
    ]
}
