//! Readers for the optional fields of a `LayerSpec`.

use specs::{LayerSpec, PaddingSpec};

use crate::{
    error::{AnalyzerErr, Result},
    shape::{Padding, PaddingMode},
    validate,
};

pub(crate) fn filter(spec: &LayerSpec) -> Result<&[i64]> {
    spec.filter
        .as_deref()
        .ok_or_else(|| AnalyzerErr::dimension("filter", "missing"))
}

pub(crate) fn strides(spec: &LayerSpec) -> Result<&[i64]> {
    spec.strides
        .as_deref()
        .ok_or_else(|| AnalyzerErr::dimension("strides", "missing"))
}

pub(crate) fn hidden(spec: &LayerSpec) -> Result<i64> {
    spec.hidden
        .ok_or_else(|| AnalyzerErr::dimension("hidden", "missing"))
}

/// Absent padding means no padding.
pub(crate) fn explicit_padding(spec: &LayerSpec) -> Result<Padding> {
    match &spec.padding {
        None => Ok(Padding::default()),
        Some(PaddingSpec::Explicit(raw)) => validate::check_padding(raw),
        Some(PaddingSpec::Mode(token)) => Err(AnalyzerErr::dimension(
            "padding",
            format!("expected a [height, width] pair, got \"{token}\""),
        )),
    }
}

/// TF-style layers have no default padding mode.
pub(crate) fn padding_mode(spec: &LayerSpec) -> Result<PaddingMode> {
    match &spec.padding {
        None => Err(AnalyzerErr::InvalidPaddingMode("nothing".into())),
        Some(PaddingSpec::Mode(token)) => validate::check_padding_mode(token),
        Some(PaddingSpec::Explicit(raw)) => Err(AnalyzerErr::InvalidPaddingMode(format!("{raw:?}"))),
    }
}
