use std::{error::Error, fmt};

/// The analyzer module's result type.
pub type Result<T> = std::result::Result<T, AnalyzerErr>;

/// Everything that can make an analysis call fail.
///
/// Failures are raised at the boundary of the offending call and never
/// recovered internally: a network analysis aborts on its first bad layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerErr {
    /// A shape, filter, stride or padding argument is malformed.
    InvalidDimension { arg: &'static str, reason: String },
    /// A TF-style padding token other than `SAME` or `VALID`.
    InvalidPaddingMode(String),
    /// A size or parameter count does not fit in an `i64`.
    Overflow(&'static str),
    /// A layer whose `type` is not one of `conv`, `pool` or `fc`.
    UnknownLayerType { index: usize, kind: String },
    /// A layer of a network failed to analyze.
    Layer {
        index: usize,
        name: String,
        source: Box<AnalyzerErr>,
    },
}

impl AnalyzerErr {
    pub(crate) fn dimension(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDimension {
            arg,
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(quantity: &'static str) -> Self {
        Self::Overflow(quantity)
    }

    /// Strips any layer context and returns the underlying failure.
    pub fn root_cause(&self) -> &AnalyzerErr {
        match self {
            AnalyzerErr::Layer { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for AnalyzerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerErr::InvalidDimension { arg, reason } => write!(f, "invalid {arg}: {reason}"),
            AnalyzerErr::InvalidPaddingMode(got) => {
                write!(f, "padding value must be \"SAME\" or \"VALID\", got {got}")
            }
            AnalyzerErr::Overflow(quantity) => write!(f, "{quantity} overflows a 64-bit integer"),
            AnalyzerErr::UnknownLayerType { index, kind } => {
                write!(f, "layer {index}: unknown layer type \"{kind}\"")
            }
            AnalyzerErr::Layer {
                index,
                name,
                source,
            } => write!(f, "layer {index} ({name}): {source}"),
        }
    }
}

impl Error for AnalyzerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AnalyzerErr::Layer { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
