use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rescal_prep::error::Result;
use rescal_prep::tensor::{read_annotations, TensorDataBuilder};

/// Write RESCAL tensor data (headers, attribute frequencies, relation slices)
/// from a need annotation file
#[derive(Debug, Parser)]
#[command(name = "rescal-data", version)]
struct Argv {
    /// Annotation file, one `need-id<TAB>kind<TAB>value` record per line
    annotations_file: PathBuf,
    /// Output folder, created if missing
    output_folder: PathBuf,
    /// Drop attributes annotated on fewer needs than this
    #[arg(long, default_value_t = 2)]
    min_frequency: usize,
    /// Also fill the description slice from DescriptionToken annotations
    #[arg(long)]
    with_description: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(argv: &Argv) -> Result<()> {
    let annotations = read_annotations(&argv.annotations_file)?;
    let mut builder = TensorDataBuilder::new()
        .with_min_frequency(argv.min_frequency)
        .with_description(argv.with_description);
    let used = builder.add_annotations(&annotations);
    log::debug!("{} of {} annotations used", used, annotations.len());

    builder.build().write(&argv.output_folder)
}

fn main() -> ExitCode {
    let argv = Argv::parse();
    let level = match argv.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    log::debug!("argv: {:?}", argv);

    if let Err(e) = run(&argv) {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
