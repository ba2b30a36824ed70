use crate::{
    errors::{Error, Result},
    library::{Choice, SampledParameters, Value},
};

use super::{check_choices, check_float_bounds, check_int_bounds, check_unique, Trial};

/// Answers every suggestion from a recorded parameter mapping.
///
/// Used to rebuild a model from a finished trial. Recorded values still have
/// to fit the domain they are asked for.
pub struct FixedTrial {
    number: usize,
    fixed: SampledParameters,
    params: SampledParameters,
}

impl FixedTrial {
    pub fn new(fixed: SampledParameters) -> Self {
        Self::new_with_number(0, fixed)
    }

    pub fn new_with_number(number: usize, fixed: SampledParameters) -> Self {
        Self {
            number,
            fixed,
            params: SampledParameters::new(),
        }
    }

    fn fixed_value(&self, name: &str) -> Result<&Value> {
        check_unique(&self.params, name)?;
        self.fixed
            .get(name)
            .ok_or_else(|| Error::MissingParameter(name.to_string()))
    }
}

fn out_of_domain(name: &str, value: &Value) -> Error {
    Error::OutOfDomain {
        name: name.to_string(),
        value: value.to_string(),
    }
}

impl Trial for FixedTrial {
    fn number(&self) -> usize {
        self.number
    }

    fn suggest_categorical(&mut self, name: &str, choices: &[Choice]) -> Result<Choice> {
        check_choices(name, choices)?;
        let value = self.fixed_value(name)?;
        let choice = value.to_choice();
        if !choices.contains(&choice) {
            return Err(out_of_domain(name, value));
        }
        self.params.insert(name, choice.clone());
        Ok(choice)
    }

    fn suggest_int(&mut self, name: &str, low: i64, high: i64, log: bool) -> Result<i64> {
        check_int_bounds(name, low, high, log)?;
        let value = match self.fixed_value(name)? {
            Value::Integer(v) if low <= *v && *v <= high => *v,
            other => return Err(out_of_domain(name, other)),
        };
        self.params.insert(name, value);
        Ok(value)
    }

    fn suggest_float(&mut self, name: &str, low: f64, high: f64, log: bool) -> Result<f64> {
        check_float_bounds(name, low, high, log)?;
        let value = self.fixed_value(name)?;
        let value = match value.to_f64() {
            Some(v) if !matches!(value, Value::Categorical(_)) && low <= v && v <= high => v,
            _ => return Err(out_of_domain(name, value)),
        };
        self.params.insert(name, value);
        Ok(value)
    }

    fn params(&self) -> &SampledParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> SampledParameters {
        let mut params = SampledParameters::new();
        params.insert("max_depth", 12i64);
        params.insert("ccp_alpha", 0.25f64);
        params.insert("max_features", Choice::None);
        params
    }

    #[test]
    fn test_returns_recorded_values() {
        let mut trial = FixedTrial::new_with_number(3, fixed());
        assert_eq!(trial.number(), 3);
        assert_eq!(trial.suggest_int("max_depth", 2, 1000, false).unwrap(), 12);
        assert_eq!(trial.suggest_float("ccp_alpha", 0., 1., false).unwrap(), 0.25);
        let choices = vec![Choice::from("sqrt"), Choice::from("log2"), Choice::None];
        assert_eq!(
            trial.suggest_categorical("max_features", &choices).unwrap(),
            Choice::None
        );
        assert_eq!(trial.params(), &fixed());
    }

    #[test]
    fn test_missing_parameter() {
        let mut trial = FixedTrial::new(fixed());
        assert_eq!(
            trial.suggest_int("max_leaf_nodes", 2, 1000, false),
            Err(Error::MissingParameter("max_leaf_nodes".to_string()))
        );
    }

    #[test]
    fn test_value_outside_domain() {
        let mut trial = FixedTrial::new(fixed());
        assert!(matches!(
            trial.suggest_int("max_depth", 2, 10, false),
            Err(Error::OutOfDomain { .. })
        ));
        assert!(matches!(
            trial.suggest_categorical("max_features", &[Choice::from("sqrt")]),
            Err(Error::OutOfDomain { .. })
        ));
        // recorded 0.25 sits below the requested range
        assert!(matches!(
            trial.suggest_float("ccp_alpha", 0.5, 1., false),
            Err(Error::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_duplicate_request() {
        let mut trial = FixedTrial::new(fixed());
        trial.suggest_int("max_depth", 2, 1000, false).unwrap();
        assert_eq!(
            trial.suggest_int("max_depth", 2, 1000, false),
            Err(Error::DuplicateParameter("max_depth".to_string()))
        );
    }
}
