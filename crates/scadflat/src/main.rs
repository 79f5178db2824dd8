// src/main.rs

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use scadflat::FlattenError;
use scadflat::flatten::flatten_file;

#[derive(Parser, Debug)]
#[command(
    name = "scadflat",
    version,
    about = "Flatten OpenSCAD include trees into one file"
)]
struct Args {
    /// Root .scad file to flatten
    file: PathBuf,

    /// Output path (default: the input with a `_compiled` suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also copy the flattened source to the system clipboard
    #[arg(short, long)]
    clipboard: bool,
}

/// `part.scad` becomes `part_compiled.scad`; an extensionless input just
/// gains the suffix.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy();
    let name = match input.extension() {
        Some(ext) => format!("{}_compiled.{}", stem, ext.to_string_lossy()),
        None => format!("{}_compiled", stem),
    };
    input.with_file_name(name)
}

fn copy_to_clipboard(text: &str) -> Result<(), FlattenError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| FlattenError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| FlattenError::Clipboard(e.to_string()))
}

fn run(args: Args) -> Result<(), FlattenError> {
    let flattened = flatten_file(&args.file)?;
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.file));
    fs::write(&output, &flattened)?;
    println!("wrote {}", output.display());

    if args.clipboard {
        match copy_to_clipboard(&flattened) {
            Ok(()) => println!("copied to clipboard"),
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!(
                    "The output file was written anyway; copying needs a desktop session (X11 or Wayland on Linux)."
                );
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
