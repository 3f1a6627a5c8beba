//! Normalization of raw, shape-like arguments into the fixed-size types the
//! analyzers work with.

use std::str::FromStr;

use crate::{
    error::{AnalyzerErr, Result},
    shape::{Kernel, Padding, PaddingMode, Shape, Stride, TfStride, Window},
};

/// Validates an input volume.
///
/// A `[height, width]` pair is accepted and gets a single channel.
///
/// # Errors
/// `InvalidDimension` if `raw` is not 2 or 3 non-negative components long.
pub fn check_input(raw: &[i64]) -> Result<Shape> {
    let shape = match *raw {
        [height, width] => Shape::new(height, width, 1),
        [height, width, channels] => Shape::new(height, width, channels),
        _ => {
            return Err(AnalyzerErr::dimension(
                "input",
                format!(
                    "must be 2 or 3 dimensional ([height, width] or [height, width, channel]), got {raw:?}"
                ),
            ));
        }
    };
    non_negative("input", raw)?;
    Ok(shape)
}

/// Validates a `[height, width, out_channels]` convolution filter.
pub fn check_kernel(raw: &[i64]) -> Result<Kernel> {
    let [height, width, out_channels] = exact::<3>(
        "filter",
        raw,
        "must be 3 dimensional ([height, width, out-channel])",
    )?;
    non_negative("filter", raw)?;
    Ok(Kernel {
        height,
        width,
        out_channels,
    })
}

/// Validates a `[height, width]` pooling window.
pub fn check_window(raw: &[i64]) -> Result<Window> {
    let [height, width] = exact::<2>("filter", raw, "must be 2 dimensional ([height, width])")?;
    non_negative("filter", raw)?;
    Ok(Window { height, width })
}

/// Validates a `[height, width]` stride.
pub fn check_stride(raw: &[i64]) -> Result<Stride> {
    let [height, width] = exact::<2>("strides", raw, "must be 2 dimensional ([height, width])")?;
    positive("strides", &[height, width], raw)?;
    Ok(Stride { height, width })
}

/// Validates a `[batch, height, width, channel]` stride.
///
/// Only the height and width entries must be positive, the others are never
/// read.
pub fn check_tf_stride(raw: &[i64]) -> Result<TfStride> {
    let strides = exact::<4>(
        "strides",
        raw,
        "must be 4 dimensional ([batch, height, width, channel])",
    )?;
    positive("strides", &strides[1..3], raw)?;
    Ok(TfStride(strides))
}

/// Validates a `[pad_height, pad_width]` explicit padding.
pub fn check_padding(raw: &[i64]) -> Result<Padding> {
    let [height, width] = exact::<2>("padding", raw, "must be 2 dimensional ([height, width])")?;
    non_negative("padding", raw)?;
    Ok(Padding { height, width })
}

/// Validates a TF-style padding token.
///
/// # Errors
/// `InvalidPaddingMode` unless `token` is exactly `SAME` or `VALID`.
pub fn check_padding_mode(token: &str) -> Result<PaddingMode> {
    token.parse()
}

impl FromStr for PaddingMode {
    type Err = AnalyzerErr;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SAME" => Ok(PaddingMode::Same),
            "VALID" => Ok(PaddingMode::Valid),
            other => Err(AnalyzerErr::InvalidPaddingMode(format!("\"{other}\""))),
        }
    }
}

fn exact<const N: usize>(arg: &'static str, raw: &[i64], expected: &str) -> Result<[i64; N]> {
    <[i64; N]>::try_from(raw)
        .map_err(|_| AnalyzerErr::dimension(arg, format!("{expected}, got {raw:?}")))
}

fn non_negative(arg: &'static str, raw: &[i64]) -> Result<()> {
    if raw.iter().any(|&v| v < 0) {
        return Err(AnalyzerErr::dimension(
            arg,
            format!("components must not be negative, got {raw:?}"),
        ));
    }
    Ok(())
}

fn positive(arg: &'static str, used: &[i64], raw: &[i64]) -> Result<()> {
    if used.iter().any(|&v| v <= 0) {
        return Err(AnalyzerErr::dimension(
            arg,
            format!("spatial steps must be positive, got {raw:?}"),
        ));
    }
    Ok(())
}
