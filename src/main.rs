use std::path::PathBuf;
use std::process::ExitCode;

use barcode_sheet::{Error, SheetConfig, SheetGenerator, write_label_images, write_output};
use clap::Parser;

/// Print sequential Code 128 barcode labels onto A4 sticker sheets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// First number in the range
    start: u64,
    /// Last number in the range (inclusive)
    end: u64,
    /// Output PDF path
    #[arg(short, long, default_value = "sticker_sheet.pdf")]
    output: PathBuf,
    /// Also write each label as <identifier>.png into this directory
    #[arg(long)]
    labels_dir: Option<PathBuf>,
    /// Log progress (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Error> {
    let generator = SheetGenerator::new(SheetConfig::default());
    let sheet = generator.build(args.start, args.end)?;

    if let Some(dir) = &args.labels_dir {
        write_label_images(&sheet.labels, dir)?;
    }

    write_output(&args.output, &sheet.pdf)?;
    log::info!(
        "Wrote {} ({} labels, {} bytes)",
        args.output.display(),
        sheet.labels.len(),
        sheet.pdf.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
