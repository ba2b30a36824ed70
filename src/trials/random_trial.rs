use rand::{rngs::ThreadRng, seq::SliceRandom, thread_rng, Rng};

use crate::{
    errors::{Error, Result},
    library::{Choice, SampledParameters},
};

use super::{check_choices, check_float_bounds, check_int_bounds, check_unique, Trial};

/// Draws every suggestion independently and uniformly, in log space when asked.
pub struct RandomTrial<R: Rng = ThreadRng> {
    number: usize,
    rng: R,
    params: SampledParameters,
}

impl RandomTrial {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            rng: thread_rng(),
            params: SampledParameters::new(),
        }
    }
}

impl<R: Rng> RandomTrial<R> {
    pub fn new_with_rng(number: usize, rng: R) -> Self {
        Self {
            number,
            rng,
            params: SampledParameters::new(),
        }
    }

    pub fn into_params(self) -> SampledParameters {
        self.params
    }
}

impl<R: Rng> Trial for RandomTrial<R> {
    fn number(&self) -> usize {
        self.number
    }

    fn suggest_categorical(&mut self, name: &str, choices: &[Choice]) -> Result<Choice> {
        check_unique(&self.params, name)?;
        check_choices(name, choices)?;
        let choice = choices
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| Error::EmptyChoices(name.to_string()))?;
        self.params.insert(name, choice.clone());
        Ok(choice)
    }

    fn suggest_int(&mut self, name: &str, low: i64, high: i64, log: bool) -> Result<i64> {
        check_unique(&self.params, name)?;
        check_int_bounds(name, low, high, log)?;
        let value = if log {
            let log_low = (low as f64 - 0.5).ln();
            let log_high = (high as f64 + 0.5).ln();
            let value = self.rng.gen_range(log_low..log_high).exp().round() as i64;
            value.clamp(low, high)
        } else {
            self.rng.gen_range(low..=high)
        };
        self.params.insert(name, value);
        Ok(value)
    }

    fn suggest_float(&mut self, name: &str, low: f64, high: f64, log: bool) -> Result<f64> {
        check_unique(&self.params, name)?;
        check_float_bounds(name, low, high, log)?;
        let value = if low == high {
            low
        } else if log {
            self.rng
                .gen_range(low.ln()..=high.ln())
                .exp()
                .clamp(low, high)
        } else {
            (low + (high - low) * self.rng.gen::<f64>()).clamp(low, high)
        };
        self.params.insert(name, value);
        Ok(value)
    }

    fn params(&self) -> &SampledParameters {
        &self.params
    }
}
