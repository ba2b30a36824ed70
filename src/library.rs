use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::estimator::{Estimator, Keyword, Task, Threshold};
use crate::trials::Trial;

/// One entry of a categorical space. `None` is the absence sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::None => write!(f, "None"),
            Choice::Bool(v) => write!(f, "{}", v),
            Choice::Int(v) => write!(f, "{}", v),
            Choice::Float(v) => write!(f, "{}", v),
            Choice::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::Str(value.to_string())
    }
}

impl From<bool> for Choice {
    fn from(value: bool) -> Self {
        Choice::Bool(value)
    }
}

impl From<i64> for Choice {
    fn from(value: i64) -> Self {
        Choice::Int(value)
    }
}

impl From<f64> for Choice {
    fn from(value: f64) -> Self {
        Choice::Float(value)
    }
}

impl From<Option<&str>> for Choice {
    fn from(value: Option<&str>) -> Self {
        value.map(Choice::from).unwrap_or(Choice::None)
    }
}

/// A concrete value suggested by a trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Categorical(Choice),
}

impl Value {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Categorical(Choice::Int(v)) => Some(*v as f64),
            Self::Categorical(Choice::Float(v)) => Some(*v),
            Self::Categorical(_) => None,
        }
    }

    /// Numbers read back from JSON lose their categorical tag, so they are
    /// compared to choices through this view.
    pub fn to_choice(&self) -> Choice {
        match self {
            Self::Integer(v) => Choice::Int(*v),
            Self::Float(v) => Choice::Float(*v),
            Self::Categorical(c) => c.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Categorical(c) => write!(f, "{}", c),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Choice> for Value {
    fn from(value: Choice) -> Self {
        Value::Categorical(value)
    }
}

/// A bound that may be written either as a count or as a fraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    fn as_integral(self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(v),
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
            Number::Float(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Declared space of a count-or-fraction hyperparameter.
///
/// The suggestion kind is picked from the element types: a space made only
/// of floats is continuous, anything else is discrete.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberSpace(pub Vec<Number>);

impl NumberSpace {
    pub fn ints(low: i64, high: i64) -> Self {
        Self(vec![Number::Int(low), Number::Int(high)])
    }

    pub fn floats(low: f64, high: f64) -> Self {
        Self(vec![Number::Float(low), Number::Float(high)])
    }

    pub fn is_all_float(&self) -> bool {
        self.0.iter().all(|n| matches!(n, Number::Float(_)))
    }
}

impl fmt::Display for NumberSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(tag = "type")]
pub enum Domain {
    Discrete { low: i64, high: i64, log: bool },
    Continuous { low: f64, high: f64, log: bool },
    Categorical { choices: Vec<Choice> },
}

impl Domain {
    pub fn from_number_space(name: &str, space: &NumberSpace, log: bool) -> Result<Self> {
        let (low, high) = match space.0.as_slice() {
            [low, high] => (*low, *high),
            other => {
                return Err(Error::InvalidSpace {
                    name: name.to_string(),
                    reason: format!("expected (low, high). Received {} values", other.len()),
                })
            }
        };
        if space.is_all_float() {
            return Ok(Domain::Continuous {
                low: low.to_f64(),
                high: high.to_f64(),
                log,
            });
        }
        let ambiguous = || Error::AmbiguousSpace {
            name: name.to_string(),
            space: space.to_string(),
        };
        Ok(Domain::Discrete {
            low: low.as_integral().ok_or_else(ambiguous)?,
            high: high.as_integral().ok_or_else(ambiguous)?,
            log,
        })
    }

    /// Issues the single suggestion request matching this domain.
    pub fn suggest<T: Trial + ?Sized>(&self, name: &str, trial: &mut T) -> Result<Value> {
        match self {
            Domain::Discrete { low, high, log } => {
                trial.suggest_int(name, *low, *high, *log).map(Value::Integer)
            }
            Domain::Continuous { low, high, log } => {
                trial.suggest_float(name, *low, *high, *log).map(Value::Float)
            }
            Domain::Categorical { choices } => trial
                .suggest_categorical(name, choices)
                .map(Value::Categorical),
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Domain::Discrete { low, high, .. }, Value::Integer(v)) => low <= v && v <= high,
            (Domain::Continuous { low, high, .. }, Value::Float(v)) => *low <= *v && *v <= *high,
            (Domain::Categorical { choices }, value) => choices.contains(&value.to_choice()),
            _ => false,
        }
    }
}

/// Ordered table of hyperparameter names and their domains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSpace {
    field_names: Vec<String>,
    domains: Vec<Domain>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, domain: Domain) -> Self {
        self.field_names.push(name.to_string());
        self.domains.push(domain);
        self
    }

    pub fn add_int(self, name: &str, (low, high): (i64, i64)) -> Self {
        self.add(
            name,
            Domain::Discrete {
                low,
                high,
                log: false,
            },
        )
    }

    pub fn add_float(self, name: &str, (low, high): (f64, f64)) -> Self {
        self.add(
            name,
            Domain::Continuous {
                low,
                high,
                log: false,
            },
        )
    }

    pub fn add_log_float(self, name: &str, (low, high): (f64, f64)) -> Self {
        self.add(
            name,
            Domain::Continuous {
                low,
                high,
                log: true,
            },
        )
    }

    pub fn add_categorical(self, name: &str, choices: &[Choice]) -> Self {
        self.add(
            name,
            Domain::Categorical {
                choices: choices.to_vec(),
            },
        )
    }

    pub fn add_number(self, name: &str, space: &NumberSpace) -> Result<Self> {
        let domain = Domain::from_number_space(name, space, false)?;
        Ok(self.add(name, domain))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.iter().find(|(n, _)| *n == name).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Domain)> {
        self.field_names
            .iter()
            .map(String::as_str)
            .zip(self.domains.iter())
    }

    /// Whether `params` names exactly these fields, each inside its domain.
    pub fn covers(&self, params: &SampledParameters) -> bool {
        params.len() == self.len()
            && self
                .iter()
                .all(|(name, domain)| params.get(name).map_or(false, |v| domain.contains(v)))
    }

    /// Asks the trial for one value per field, in declaration order.
    pub fn sample_params<T: Trial + ?Sized>(&self, trial: &mut T) -> Result<SampledParameters> {
        let mut params = SampledParameters::new();
        for (name, domain) in self.iter() {
            let value = domain.suggest(name, trial)?;
            log::trace!("Suggested {}={}", name, value);
            params.insert(name, value);
        }
        Ok(params)
    }
}

/// Hyperparameter name to sampled value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampledParameters(BTreeMap<String, Value>);

impl SampledParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn reader(&self) -> ParamReader<'_> {
        ParamReader::new(self)
    }
}

impl FromIterator<(String, Value)> for SampledParameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SampledParameters {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Typed access to sampled parameters, used by model constructors.
///
/// Every parameter has to be read before [`ParamReader::finish`], the same
/// way a keyword constructor rejects arguments it does not know.
pub struct ParamReader<'a> {
    params: &'a SampledParameters,
    consumed: BTreeSet<&'a str>,
}

impl<'a> ParamReader<'a> {
    pub(crate) fn new(params: &'a SampledParameters) -> Self {
        Self {
            params,
            consumed: BTreeSet::new(),
        }
    }

    fn next_value(&mut self, name: &str) -> Result<&'a Value> {
        let (key, value) = self
            .params
            .0
            .get_key_value(name)
            .ok_or_else(|| Error::MissingParameter(name.to_string()))?;
        self.consumed.insert(key.as_str());
        Ok(value)
    }

    pub fn next_i64(&mut self, name: &str) -> Result<i64> {
        match self.next_value(name)? {
            Value::Integer(v) => Ok(*v),
            other => Err(type_error(name, "an integer", other)),
        }
    }

    pub fn next_f64(&mut self, name: &str) -> Result<f64> {
        match self.next_value(name)? {
            Value::Float(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => Err(type_error(name, "a float", other)),
        }
    }

    pub fn next_threshold(&mut self, name: &str) -> Result<Threshold> {
        match self.next_value(name)? {
            Value::Integer(v) => Ok(Threshold::Count(*v)),
            Value::Float(v) => Ok(Threshold::Fraction(*v)),
            other => Err(type_error(name, "a count or a fraction", other)),
        }
    }

    pub fn next_bool(&mut self, name: &str) -> Result<bool> {
        match self.next_value(name)? {
            Value::Categorical(Choice::Bool(v)) => Ok(*v),
            other => Err(type_error(name, "a boolean", other)),
        }
    }

    /// Reads a keyword that may be the `None` sentinel.
    pub fn next_keyword<K: Keyword>(&mut self, name: &str) -> Result<Option<K>> {
        match self.next_value(name)? {
            Value::Categorical(Choice::None) => Ok(None),
            Value::Categorical(Choice::Str(s)) => K::from_keyword(s)
                .map(Some)
                .ok_or_else(|| Error::UnknownKeyword {
                    name: name.to_string(),
                    value: s.clone(),
                }),
            other => Err(type_error(name, "a keyword", other)),
        }
    }

    pub fn next_required_keyword<K: Keyword>(&mut self, name: &str) -> Result<K> {
        self.next_keyword(name)?.ok_or_else(|| Error::ParameterType {
            name: name.to_string(),
            expected: "a keyword",
            found: Choice::None.to_string(),
        })
    }

    pub fn finish(self) -> Result<()> {
        match self.params.names().find(|n| !self.consumed.contains(n)) {
            Some(name) => Err(Error::UnexpectedParameter(name.to_string())),
            None => Ok(()),
        }
    }
}

fn type_error(name: &str, expected: &'static str, found: &Value) -> Error {
    Error::ParameterType {
        name: name.to_string(),
        expected,
        found: found.to_string(),
    }
}

/// A model family: a declared search space plus a constructor.
pub trait ModelFamily {
    type Model: Estimator + Clone;
    const NAME: &'static str;
    const TASK: Task;

    fn describe_space(&self) -> Result<SearchSpace>;
    fn build(&self, params: &SampledParameters) -> Result<Self::Model>;
}

/// Samples parameters for a family and constructs its model.
///
/// The last model built is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct Sampler<F: ModelFamily> {
    family: F,
    model: Option<F::Model>,
}

impl<F: ModelFamily> Sampler<F> {
    pub fn new(family: F) -> Self {
        Self {
            family,
            model: None,
        }
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn family_mut(&mut self) -> &mut F {
        &mut self.family
    }

    pub fn model(&self) -> Option<&F::Model> {
        self.model.as_ref()
    }

    pub fn sample_params<T: Trial + ?Sized>(
        &self,
        trial: Option<&mut T>,
    ) -> Result<SampledParameters> {
        let trial = trial.ok_or(Error::MissingTrial)?;
        self.family.describe_space()?.sample_params(trial)
    }

    pub fn sample_model<T: Trial + ?Sized>(&mut self, trial: Option<&mut T>) -> Result<F::Model> {
        let params = self.sample_params(trial)?;
        let model = self.family.build(&params)?;
        log::debug!("Sampled {} with {} parameters", F::NAME, params.len());
        self.model = Some(model.clone());
        Ok(model)
    }
}

impl<F: ModelFamily> From<F> for Sampler<F> {
    fn from(family: F) -> Self {
        Self::new(family)
    }
}
