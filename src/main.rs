use anyhow::{bail, Context, Result};
use clap::Parser;
use downsize::{
    collect_selection, format_file_size, BatchProcessor, Cli, Commands, ProcessingOutcome,
    ProcessingStats, ResizeOptions,
};
use log::LevelFilter;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Select { dir, threshold } => process_select(&dir, threshold),
        Commands::Resize {
            dir,
            threshold,
            target,
            strategy,
            algorithm,
            quality,
            save,
            subfolder,
            prefix,
            copy_originals,
            yes,
            threads,
        } => {
            let options = ResizeOptions {
                target,
                strategy,
                algorithm,
                quality,
                save,
                subfolder,
                prefix,
                copy_originals,
                yes,
                threads,
            };
            process_resize(&dir, threshold, options)
        }
    }
}

fn process_select(dir: &Path, threshold: u32) -> Result<()> {
    let selection = collect_selection(dir, threshold)
        .with_context(|| format!("Failed to select images in {}", dir.display()))?;

    println!(
        "The following files are selected ({} in total):",
        selection.len()
    );
    for filename in &selection {
        println!("  {}", filename);
    }

    Ok(())
}

fn process_resize(dir: &Path, threshold: u32, options: ResizeOptions) -> Result<()> {
    let config = options.into_config().context("Invalid configuration")?;

    let selection = collect_selection(dir, threshold)
        .with_context(|| format!("Failed to select images in {}", dir.display()))?;

    let processor = BatchProcessor::new(dir, config)?.with_progress(true);
    let outcomes = processor.run(&selection).context("Batch aborted")?;

    for outcome in &outcomes {
        match outcome {
            ProcessingOutcome::Success {
                source,
                destination,
                original,
                resized,
                ..
            } => println!(
                "{} - {}x{} -> {}x{}, saved to {}",
                source.display(),
                original.0,
                original.1,
                resized.0,
                resized.1,
                destination.display()
            ),
            ProcessingOutcome::Failure { source, error } => {
                println!("{} - FAILED: {}", source.display(), error)
            }
        }
    }

    let stats = ProcessingStats::from_outcomes(&outcomes);
    println!(
        "Batch processing complete. Resized {} images ({} written), {} failed.",
        stats.succeeded,
        format_file_size(stats.bytes_written),
        stats.failed
    );

    if stats.failed > 0 {
        bail!("{} of {} images failed", stats.failed, outcomes.len());
    }

    Ok(())
}
