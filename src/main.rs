use std::path::PathBuf;

use analyzer::{Convention, Options, analyze_network};
use anyhow::Context;
use clap::Parser;
use log::info;
use specs::OptionsSpec;

/// Structural statistics (shapes, neurons, weights, memory) of a
/// feed-forward network described by a JSON layer list.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Network document: a list of layers or `{input, options, layers}`.
    file: PathBuf,

    /// Input shape, `height,width[,channel]`.
    #[arg(long, value_delimiter = ',')]
    input: Option<Vec<i64>>,

    /// Leave bias terms out of the weight counts.
    #[arg(long)]
    no_bias: bool,

    /// Use SAME/VALID padding and 4-component strides for conv and pool layers.
    #[arg(long)]
    tensorflow: bool,

    /// Also report memory for a batch of this size.
    #[arg(long)]
    batch_size: Option<u64>,

    /// Print the statistics as JSON instead of a text report.
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Command-line switches take precedence over the document's options.
    fn merge_options(&self, options: OptionsSpec) -> OptionsSpec {
        OptionsSpec {
            no_bias: options.no_bias || self.no_bias,
            tensorflow: options.tensorflow || self.tensorflow,
            batch_size: self.batch_size.or(options.batch_size),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let spec = specs::load_network(&args.file)?;
    info!(
        "loaded {} layer(s) from {}",
        spec.layers.len(),
        args.file.display()
    );

    let options = args.merge_options(spec.options);
    let input = args
        .input
        .clone()
        .or(spec.input)
        .context("no input shape: pass --input or set \"input\" in the document")?;

    let convention = Convention::from(&options);
    info!("analyzing with {convention:?} padding, input {input:?}");
    let stat = analyze_network(&spec.layers, &input, convention, &Options::from(&options))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stat)?);
    } else {
        nn_stats::print_report(&stat, options.batch_size)?;
    }

    Ok(())
}
