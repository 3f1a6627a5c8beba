use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{LayerSpec, Result, SpecErr};

/// Analysis options as written in a document or on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsSpec {
    /// Leave the bias term out of weight and connection counts.
    pub no_bias: bool,
    /// Analyze conv and pool layers with `SAME`/`VALID` padding semantics.
    pub tensorflow: bool,
    /// Only used when reporting memory per batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u64>,
}

/// A network together with its declared input and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<i64>>,
    #[serde(default)]
    pub options: OptionsSpec,
    pub layers: Vec<LayerSpec>,
}

/// Accepted top-level shapes of a network document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkDocument {
    /// A bare, ordered list of layers.
    Layers(Vec<LayerSpec>),
    Network(NetworkSpec),
}

impl NetworkDocument {
    /// Normalizes both document shapes into a `NetworkSpec`.
    pub fn into_spec(self) -> NetworkSpec {
        match self {
            NetworkDocument::Layers(layers) => NetworkSpec {
                layers,
                ..Default::default()
            },
            NetworkDocument::Network(spec) => spec,
        }
    }
}

/// Parses a network document from a JSON string.
///
/// # Errors
/// Returns `SpecErr::Json` if the text is not a valid document.
pub fn parse_network(content: &str) -> Result<NetworkSpec> {
    let doc: NetworkDocument = serde_json::from_str(content)?;
    Ok(doc.into_spec())
}

/// Loads a network document from a JSON file.
///
/// # Arguments
/// * `path` - The location of the document.
///
/// # Returns
/// The normalized network specification.
///
/// # Errors
/// Returns a `SpecErr` if the file cannot be read or parsed.
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SpecErr::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_network(&content)
}
