//! Structural statistics of feed-forward networks.
//!
//! Given only layer hyperparameters, computes every layer's output shape,
//! neuron count, parameter count and memory footprint, and sums them over a
//! network.

pub mod convention;
pub mod error;
pub mod layers;
pub mod network;
pub mod options;
pub mod shape;
pub mod stats;
pub mod validate;

pub use convention::Convention;
pub use error::{AnalyzerErr, Result};
pub use layers::{
    Layer, analyze_conv, analyze_conv_tf, analyze_fc, analyze_pool, analyze_pool_tf, same_padding,
};
pub use network::analyze_network;
pub use options::Options;
pub use shape::{Pad, PaddingMode, Shape};
pub use stats::{Analysis, LayerKind, LayerStat, NetworkStat, Output};
