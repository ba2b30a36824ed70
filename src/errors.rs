use thiserror::Error;

/// Errors raised while describing, suggesting or constructing a model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("A trial is required to sample a model")]
    MissingTrial,

    #[error("Invalid bounds for {name}: low={low} is greater than high={high}")]
    InvalidBounds {
        name: String,
        low: String,
        high: String,
    },

    #[error("Log scale requires a positive lower bound for {name}. Received {low}")]
    InvalidLogBounds { name: String, low: String },

    #[error("No choices given for {0}")]
    EmptyChoices(String),

    #[error("Parameter {0} was already suggested in this trial")]
    DuplicateParameter(String),

    #[error("Invalid space for {name}: {reason}")]
    InvalidSpace { name: String, reason: String },

    #[error("Ambiguous space for {name}: {space} mixes integers with fractional floats")]
    AmbiguousSpace { name: String, space: String },

    #[error("Parameter not found: {0}")]
    MissingParameter(String),

    #[error("Expected {expected} for {name}. Received {found}")]
    ParameterType {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("Unknown value {value} for {name}")]
    UnknownKeyword { name: String, value: String },

    #[error("Unexpected parameter {0}")]
    UnexpectedParameter(String),

    #[error("Value {value} is outside the domain of {name}")]
    OutOfDomain { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidBounds {
            name: "max_depth".to_string(),
            low: "10".to_string(),
            high: "2".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("max_depth"));
        assert!(message.contains("low=10"));

        let err = Error::DuplicateParameter("criterion".to_string());
        assert!(err.to_string().contains("already suggested"));

        let err = Error::AmbiguousSpace {
            name: "min_samples_leaf".to_string(),
            space: "[1, 0.5]".to_string(),
        };
        assert!(err.to_string().contains("[1, 0.5]"));
    }
}
