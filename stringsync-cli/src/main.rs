mod extract;
mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use stringsync::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned recursively for source files
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Directory where the .strings tables live
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Show debug messages
    #[arg(short, long)]
    verbose: bool,

    /// File extensions to scan; may be repeated (defaults to c, m, mm, swift)
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Skip paths containing this substring; may be repeated
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore_patterns: Vec<String>,

    /// Also localize interface files (xib, nib, storyboard) via ibtool
    #[arg(long)]
    interface: bool,

    /// Run the built-in parser and merge checks, then exit
    #[arg(long)]
    self_test: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    if args.self_test {
        return self_test::run();
    }

    if !args.input.is_dir() {
        bail!("input path `{}` is not a directory", args.input.display());
    }

    update_source_strings(&args)?;
    if args.interface {
        update_interface_strings(&args)?;
    }
    Ok(())
}

/// Runs genstrings over all matching source files and reconciles every
/// table it produces with the same-named table in the output directory.
fn update_source_strings(args: &Args) -> Result<()> {
    let extensions = if args.extensions.is_empty() {
        scan::DEFAULT_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    } else {
        args.extensions.clone()
    };
    let sources = scan::find_sources(&args.input, &extensions, &args.ignore_patterns);
    info!("found {} source files", sources.len());
    if sources.is_empty() {
        return Ok(());
    }

    // TempDir removes the extraction area on every exit path.
    let extraction_dir = tempfile::tempdir().context("creating extraction directory")?;
    extract::run_genstrings(&sources, extraction_dir.path())?;

    reconcile_extracted_tables(extraction_dir.path(), &args.output, false)
}

/// Exports strings from every interface file via ibtool and reconciles
/// them, keeping existing comments: ibtool generates object-ID comments
/// that would clobber hand-written ones.
fn update_interface_strings(args: &Args) -> Result<()> {
    let extensions: Vec<String> = scan::INTERFACE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect();
    let sources = scan::find_sources(&args.input, &extensions, &args.ignore_patterns);
    info!("found {} interface files", sources.len());

    let extraction_dir = tempfile::tempdir().context("creating extraction directory")?;
    for source in sources {
        let Some(stem) = source.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let table_name = format!("{stem}.strings");
        let export = extraction_dir.path().join(&table_name);
        extract::run_ibtool(&source, &export)?;

        let current = args.output.join(&table_name);
        reconcile_table(&export, &current, &args.output, true)?;
        // Same-named interface files in different directories reuse this
        // export path; never let a stale export feed the next merge.
        fs::remove_file(&export)?;
    }
    Ok(())
}

/// Reconciles every table the extraction tool produced with the
/// same-named table in the output directory.
fn reconcile_extracted_tables(
    extraction_dir: &Path,
    output_dir: &Path,
    keep_comment: bool,
) -> Result<()> {
    for entry in fs::read_dir(extraction_dir)? {
        let extracted = entry?.path();
        let Some(name) = extracted.file_name() else {
            continue;
        };
        let current = output_dir.join(name);
        reconcile_table(&extracted, &current, output_dir, keep_comment)?;
    }
    Ok(())
}

/// Merges one extracted table into its on-disk counterpart.
///
/// A table that cannot be read or decoded is reported and skipped so the
/// remaining tables still get updated; one corrupt legacy file must not
/// block the whole run. Write failures stay fatal.
fn reconcile_table(
    extracted: &Path,
    current: &Path,
    output_dir: &Path,
    keep_comment: bool,
) -> Result<()> {
    match stringsync::merge_into(extracted, current, output_dir, keep_comment) {
        Ok(()) => Ok(()),
        Err(skipped @ (Error::Decode { .. } | Error::Io(_))) => {
            error!(path = %current.display(), error = %skipped, "table skipped");
            Ok(())
        }
        Err(fatal) => {
            Err(fatal).with_context(|| format!("updating {}", current.display()))
        }
    }
}
