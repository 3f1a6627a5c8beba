use serde::{Deserialize, Serialize};

/// The padding field of a layer, as written in the document.
///
/// Explicit-padding layers take a `[pad_height, pad_width]` pair, TF-style
/// layers take the `"SAME"` or `"VALID"` token. Which one is acceptable is
/// decided by the analyzer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingSpec {
    Explicit(Vec<i64>),
    Mode(String),
}

/// One entry of the layer list, unvalidated.
///
/// `kind` stays a raw string so an unrecognized type can be reported
/// together with its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strides: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<i64>,
    /// Bytes per output element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasize: Option<u64>,
}

impl LayerSpec {
    /// Creates a convolution entry with explicit padding.
    pub fn conv(filter: [i64; 3], strides: [i64; 2], padding: [i64; 2]) -> Self {
        Self {
            kind: "conv".into(),
            filter: Some(filter.to_vec()),
            strides: Some(strides.to_vec()),
            padding: Some(PaddingSpec::Explicit(padding.to_vec())),
            ..Default::default()
        }
    }

    /// Creates a pooling entry without padding.
    pub fn pool(filter: [i64; 2], strides: [i64; 2]) -> Self {
        Self {
            kind: "pool".into(),
            filter: Some(filter.to_vec()),
            strides: Some(strides.to_vec()),
            ..Default::default()
        }
    }

    /// Creates a fully-connected entry.
    pub fn fc(hidden: i64) -> Self {
        Self {
            kind: "fc".into(),
            hidden: Some(hidden),
            ..Default::default()
        }
    }

    /// Sets the layer's display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the bytes per output element used for memory accounting.
    pub fn with_datasize(mut self, datasize: u64) -> Self {
        self.datasize = Some(datasize);
        self
    }

    /// Replaces the padding field.
    pub fn with_padding(mut self, padding: PaddingSpec) -> Self {
        self.padding = Some(padding);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_accepts_pair_or_token() {
        let pair: PaddingSpec = serde_json::from_str("[1, 1]").unwrap();
        assert_eq!(pair, PaddingSpec::Explicit(vec![1, 1]));

        let token: PaddingSpec = serde_json::from_str("\"SAME\"").unwrap();
        assert_eq!(token, PaddingSpec::Mode("SAME".into()));
    }

    #[test]
    fn layer_reads_type_field_verbatim() {
        let layer: LayerSpec =
            serde_json::from_str(r#"{"type": "lstm", "hidden": 12}"#).unwrap();
        assert_eq!(layer.kind, "lstm");
        assert_eq!(layer.hidden, Some(12));
        assert!(layer.filter.is_none());
    }

    #[test]
    fn builders_fill_fields() {
        let layer = LayerSpec::conv([3, 3, 64], [1, 1], [1, 1])
            .named("conv1_1")
            .with_datasize(4);
        assert_eq!(layer.kind, "conv");
        assert_eq!(layer.name.as_deref(), Some("conv1_1"));
        assert_eq!(layer.padding, Some(PaddingSpec::Explicit(vec![1, 1])));
        assert_eq!(layer.datasize, Some(4));
    }
}
