//! Text rendering of network statistics.

use std::io::{self, Write};

use analyzer::{LayerStat, NetworkStat};

use crate::format::{DEFAULT_PRECISION, convert_data, convert_number};

fn count(n: i64) -> String {
    format!("{n} ({})", convert_number(n, DEFAULT_PRECISION))
}

fn bytes(n: i64) -> String {
    convert_data(n, DEFAULT_PRECISION)
}

/// Memory of a whole batch, refusing sizes beyond `i64`.
fn per_batch(memory: i64, batch: u64) -> io::Result<i64> {
    i64::try_from(batch)
        .ok()
        .and_then(|batch| memory.checked_mul(batch))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("memory per batch of {batch} overflows a 64-bit integer"),
            )
        })
}

fn write_layer<W: Write>(layer: &LayerStat, batch_size: Option<u64>, out: &mut W) -> io::Result<()> {
    writeln!(out, "Layer name: {}", layer.name)?;
    writeln!(out, "\tType: {}", layer.kind)?;
    writeln!(out, "\tOutput shape: {}", layer.output)?;
    writeln!(out, "\tNumber of neurons: {}", count(layer.neurons))?;
    writeln!(out, "\tNumber of connections: {}", count(layer.weights))?;
    if layer.reduced_weights != 0 {
        writeln!(
            out,
            "\tNumber of reduced connections: {}",
            count(layer.reduced_weights)
        )?;
    }
    if let Some(pad) = layer.pad {
        writeln!(
            out,
            "\tPadding: top {}, bottom {}, left {}, right {}",
            pad.top, pad.bottom, pad.left, pad.right
        )?;
    }
    if let Some(memory) = layer.memory.filter(|&m| m != 0) {
        writeln!(out, "\tMemory: {}", bytes(memory))?;
        if let Some(batch) = batch_size {
            writeln!(
                out,
                "\tMemory per batch ({batch}): {}",
                bytes(per_batch(memory, batch)?)
            )?;
        }
    }
    Ok(())
}

/// Writes one block per layer followed by the network totals.
///
/// # Arguments
/// * `stat` - The analyzed network.
/// * `batch_size` - When set, memory is also reported for a whole batch.
/// * `out` - Where the report goes.
///
/// # Errors
/// Any error of the underlying writer, or `InvalidInput` if the memory of a
/// batch does not fit in an `i64`.
pub fn write_report<W: Write>(
    stat: &NetworkStat,
    batch_size: Option<u64>,
    out: &mut W,
) -> io::Result<()> {
    for layer in &stat.layers {
        write_layer(layer, batch_size, out)?;
    }

    writeln!(out, "Total:")?;
    writeln!(out, "\t{} neurons", count(stat.neurons))?;
    writeln!(out, "\t{} connections", count(stat.weights))?;
    writeln!(out, "\t{} reduced connections", count(stat.reduced_weights))?;
    if stat.memory > 0 {
        writeln!(out, "\tMemory: {}", bytes(stat.memory))?;
        if let Some(batch) = batch_size {
            writeln!(
                out,
                "\tMemory per batch ({batch}): {}",
                bytes(per_batch(stat.memory, batch)?)
            )?;
        }
    }
    Ok(())
}

/// Writes the report to standard output.
pub fn print_report(stat: &NetworkStat, batch_size: Option<u64>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(stat, batch_size, &mut out)
}
