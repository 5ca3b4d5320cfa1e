use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rescal_prep::builder::CategorySliceBuilder;

/// Build the need × category slice `category.mtx` and append the discovered
/// categories to `<folder>/headers.txt`
#[derive(Debug, Parser)]
#[command(name = "category-slice", version)]
struct Argv {
    /// Folder holding headers.txt; category.mtx is written here
    folder: PathBuf,
    /// Assignment file, one `cat1, cat2: need-id` record per line
    allneeds_file: PathBuf,
    /// Fail when more distinct categories than this are found
    #[arg(long)]
    max_categories: Option<usize>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let argv = Argv::parse();
    init_logging(argv.verbose);
    log::debug!("argv: {:?}", argv);

    let mut builder = CategorySliceBuilder::new();
    if let Some(limit) = argv.max_categories {
        builder = builder.with_max_categories(limit);
    }

    match builder.run(&argv.folder, &argv.allneeds_file) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}
