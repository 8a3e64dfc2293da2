use std::fmt;

use serde::Serialize;

use crate::error::NetworkError;
use crate::network::network::{classify, Network};
use crate::sample::Sample;

/// Outcome of running the network over a set of labeled samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    pub total_cost: f64,
}

impl Evaluation {
    /// Fraction classified correctly, `0.0` when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn mean_cost(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.total_cost / self.total as f64
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} correct ({:.2}%)",
            self.correct,
            self.total,
            self.accuracy() * 100.0
        )
    }
}

impl Network {
    /// Forward-only pass over `samples`, counting argmax hits against each label.
    pub fn validate<'a, S, I>(&self, samples: I) -> Result<Evaluation, NetworkError>
    where
        S: Sample + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut eval = Evaluation::default();
        for sample in samples {
            let output = self.feed(&sample.to_input()?)?;
            if classify(&output)? == sample.label() {
                eval.correct += 1;
            }
            eval.total_cost += f64::from(sample.cost(&output)?);
            eval.total += 1;
        }
        Ok(eval)
    }
}
