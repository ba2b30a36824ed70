use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Classification,
    Regression,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Classification => write!(f, "classification"),
            Task::Regression => write!(f, "regression"),
        }
    }
}

/// A constructed, unfitted model.
pub trait Estimator: fmt::Debug {
    fn name(&self) -> &'static str;
    fn task(&self) -> Task;
}

/// String-valued constructor argument.
pub trait Keyword: Sized {
    fn from_keyword(value: &str) -> Option<Self>;
    fn as_keyword(&self) -> &'static str;
}

/// Split and leaf sizes are either an absolute count or a fraction of the samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Threshold {
    Count(i64),
    Fraction(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Splitter {
    Best,
    Random,
}

impl Keyword for Splitter {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "best" => Some(Self::Best),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Random => "random",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    Sqrt,
    Log2,
}

impl Keyword for MaxFeatures {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "sqrt" => Some(Self::Sqrt),
            "log2" => Some(Self::Log2),
            _ => None,
        }
    }

    fn as_keyword(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Log2 => "log2",
        }
    }
}
