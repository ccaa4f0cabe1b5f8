use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tabedit::{
    CodecOptions, CommandEditor, CsvReadOptions, CsvWriteOptions, convert_file, edit_file_into,
    view_file,
};

fn main() {
    // Initialize tracing subscriber to respect RUST_LOG, warnings by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("tabedit: {err}");
        process::exit(1);
    }
}

#[derive(Parser)]
#[command(
    name = "tabedit",
    version,
    about = "Edit Parquet, gzip and text files in your text editor"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the editable form of FILE (CSV for Parquet) to stdout.
    View {
        file: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Convert SRC to DST; formats follow the file names.
    Convert {
        src: PathBuf,
        dst: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Open FILE in an editor and save it if it changed, to DESTINATION
    /// when given, otherwise back to FILE.
    Edit {
        file: PathBuf,
        /// Where to save the edited file; its name picks the format.
        destination: Option<PathBuf>,
        /// Editor command; defaults to $EDITOR, then vi.
        #[arg(long, value_name = "COMMAND")]
        editor: Option<String>,
        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// CSV field delimiter (a single ASCII character).
    #[arg(long, value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
    /// List pandas index columns first in the CSV.
    #[arg(long = "index-first")]
    index_first: bool,
}

impl FormatArgs {
    fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            read: CsvReadOptions {
                delimiter: self.delimiter,
            },
            write: CsvWriteOptions {
                delimiter: self.delimiter,
                ..Default::default()
            },
            index_columns_first: self.index_first,
            ..Default::default()
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' => Ok(*byte),
        _ => Err(format!("invalid delimiter '{value}': expected one ASCII character")),
    }
}

fn run() -> tabedit::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::View { file, format } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            view_file(&file, &format.codec_options(), &mut out)
        }
        Command::Convert { src, dst, format } => {
            convert_file(&src, &dst, &format.codec_options())
        }
        Command::Edit {
            file,
            destination,
            editor,
            format,
        } => {
            let editor = CommandEditor::resolve(editor.as_deref());
            let dst = destination.as_deref().unwrap_or(&file);
            let changed = edit_file_into(&file, dst, &format.codec_options(), &editor)?;
            if !changed {
                eprintln!("no changes, not writing {}", dst.display());
            }
            Ok(())
        }
    }
}
