pub mod fixed_trial;
pub mod random_trial;

use crate::{
    errors::{Error, Result},
    library::{Choice, SampledParameters},
};

/// Per-iteration context handing out parameter suggestions.
///
/// Implemented by whatever drives the search. Each name may be suggested
/// once per trial.
pub trait Trial {
    fn number(&self) -> usize;

    fn suggest_categorical(&mut self, name: &str, choices: &[Choice]) -> Result<Choice>;

    /// Suggests an integer in `[low, high]`.
    fn suggest_int(&mut self, name: &str, low: i64, high: i64, log: bool) -> Result<i64>;

    /// Suggests a float in `[low, high]`.
    fn suggest_float(&mut self, name: &str, low: f64, high: f64, log: bool) -> Result<f64>;

    /// Everything suggested so far.
    fn params(&self) -> &SampledParameters;
}

pub(crate) fn check_unique(params: &SampledParameters, name: &str) -> Result<()> {
    if params.contains(name) {
        return Err(Error::DuplicateParameter(name.to_string()));
    }
    Ok(())
}

pub(crate) fn check_int_bounds(name: &str, low: i64, high: i64, log: bool) -> Result<()> {
    if low > high {
        return Err(Error::InvalidBounds {
            name: name.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        });
    }
    if log && low < 1 {
        return Err(Error::InvalidLogBounds {
            name: name.to_string(),
            low: low.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_float_bounds(name: &str, low: f64, high: f64, log: bool) -> Result<()> {
    // The width must be finite too, or uniform sampling has no range.
    if !(high - low).is_finite() || low > high {
        return Err(Error::InvalidBounds {
            name: name.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        });
    }
    if log && low <= 0. {
        return Err(Error::InvalidLogBounds {
            name: name.to_string(),
            low: low.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_choices(name: &str, choices: &[Choice]) -> Result<()> {
    if choices.is_empty() {
        return Err(Error::EmptyChoices(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checks() {
        assert!(check_int_bounds("max_depth", 2, 2, false).is_ok());
        assert!(matches!(
            check_int_bounds("max_depth", 5, 2, false),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            check_int_bounds("max_iter", 0, 10, true),
            Err(Error::InvalidLogBounds { .. })
        ));
        assert!(matches!(
            check_float_bounds("tol", f64::NAN, 1., false),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            check_float_bounds("var_smoothing", 0., 1e-6, true),
            Err(Error::InvalidLogBounds { .. })
        ));
        assert!(matches!(
            check_float_bounds("coef0", -1e308, 1e308, false),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(check_float_bounds("coef0", 0., f64::MAX, false).is_ok());
        assert_eq!(
            check_choices("kernel", &[]),
            Err(Error::EmptyChoices("kernel".to_string()))
        );
    }
}
