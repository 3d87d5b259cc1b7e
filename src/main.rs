//! xlsxtext CLI
//!
//! Converts a spreadsheet into tab-separated plain text and saves it as
//! `<base name>.txt`, or prints it to stdout.
//!
//! Usage:
//!   xlsxtext Report.xlsx
//!   xlsxtext Report.xlsx --output-dir out/
//!   xlsxtext Report.xlsx --stdout --sheet Summary --date-format serial
//!   xlsxtext data.csv --delimiter ';' --state-json
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=xlsxtext=debug`).

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xlsxtext::{
    ConverterBuilder, DateFormat, SelectedFile, SessionController, SheetSelector,
    XlsxToTextError,
};

/// Spreadsheet to plain text converter
#[derive(Parser, Debug)]
#[command(name = "xlsxtext")]
#[command(about = "Convert every sheet of a spreadsheet into tab-separated plain text")]
struct Args {
    /// Input file (xlsx, xlsm, xlsb, xls, ods or csv)
    input: PathBuf,

    /// Directory to write `<base name>.txt` into
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Print the text to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Sheet to convert (can be specified multiple times; default: all sheets)
    #[arg(long, short = 's')]
    sheet: Vec<String>,

    /// Date format: iso8601, serial or a chrono format string
    #[arg(long, default_value = "iso8601")]
    date_format: String,

    /// CSV field delimiter (a single ASCII character, or "tab")
    #[arg(long, short = 'd', default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Print the final session state as JSON
    #[arg(long)]
    state_json: bool,
}

/// Parse a single-byte delimiter from command line
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("Delimiter must be a single ASCII character: {}", s)),
    }
}

fn build_controller(args: &Args) -> Result<SessionController, XlsxToTextError> {
    let selector = if args.sheet.is_empty() {
        SheetSelector::All
    } else {
        SheetSelector::Names(args.sheet.clone())
    };

    let converter = ConverterBuilder::new()
        .with_sheet_selector(selector)
        .with_date_format(DateFormat::from_spec(&args.date_format))
        .with_csv_delimiter(args.delimiter)
        .build()?;

    Ok(SessionController::new(converter))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let controller = match build_controller(&args) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    controller
        .on_file_selected(&SelectedFile::from_path(&args.input))
        .await;

    let mut failed = false;

    if let Some(download) = controller.download_as_file().await {
        if args.stdout {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(download.content().as_bytes()) {
                eprintln!("error: {}", e);
                failed = true;
            }
        } else {
            match download.save_to(&args.output_dir) {
                Ok(path) => eprintln!("wrote {}", path.display()),
                Err(e) => {
                    eprintln!("error: failed to write {}: {}", download.file_name(), e);
                    failed = true;
                }
            }
        }
    }

    let state = controller.snapshot().await;

    if args.state_json {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                failed = true;
            }
        }
    }

    if let Some(error) = &state.error {
        eprintln!("error: {}", error);
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
