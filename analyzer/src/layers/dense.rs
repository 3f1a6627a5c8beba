use crate::{
    error::{AnalyzerErr, Result},
    stats::{Analysis, Output},
};

/// A fully-connected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dense {
    hidden: i64,
}

impl Dense {
    /// Creates a dense layer with `hidden` output neurons.
    ///
    /// # Errors
    /// `InvalidDimension` if `hidden` is negative.
    pub fn new(hidden: i64) -> Result<Self> {
        if hidden < 0 {
            return Err(AnalyzerErr::dimension(
                "hidden",
                format!("neuron count must not be negative, got {hidden}"),
            ));
        }
        Ok(Self { hidden })
    }

    /// The input is flattened, every input element connects to every output
    /// neuron. No bias is counted and connections are not tracked per neuron.
    ///
    /// # Errors
    /// `Overflow` if the connection count does not fit in an `i64`.
    pub fn analyze(&self, input: &Output) -> Result<Analysis> {
        let weights = input
            .size()?
            .checked_mul(self.hidden)
            .ok_or(AnalyzerErr::overflow("weights"))?;

        Ok(Analysis {
            output: Output::Scalar(self.hidden),
            neurons: self.hidden,
            weights,
            reduced_weights: None,
            connections_per_neuron: 0,
            pad: None,
        })
    }
}

/// Analyzes a fully-connected layer.
///
/// # Arguments
/// * `input` - Either a volume (flattened) or a plain neuron count.
/// * `hidden` - Number of output neurons.
///
/// # Errors
/// `InvalidDimension` if either size is negative, `Overflow` if the
/// connection count does not fit in an `i64`.
pub fn analyze_fc(input: Output, hidden: i64) -> Result<Analysis> {
    match input {
        Output::Scalar(n) if n < 0 => {
            return Err(AnalyzerErr::dimension(
                "input",
                format!("neuron count must not be negative, got {n}"),
            ));
        }
        _ => {}
    }
    Dense::new(hidden)?.analyze(&input)
}
