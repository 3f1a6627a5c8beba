mod error;
mod layer;
mod network;

pub use error::{Result, SpecErr};
pub use layer::{LayerSpec, PaddingSpec};
pub use network::{NetworkDocument, NetworkSpec, OptionsSpec, load_network, parse_network};
