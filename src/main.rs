/*!
 * Command-line interface for treeforge
 */

use std::fs;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use treeforge::capture::{CaptureOptions, Capturer};
use treeforge::config::{Args, Config, Mode};
use treeforge::description::{load_description, to_json_string};
use treeforge::enumerator::TreeEnumerator;
use treeforge::error::{FsResultExt, Result};
use treeforge::materializer::Materializer;
use treeforge::report::{Reporter, RunReport};
use treeforge::types::{count_files, count_folders};
use treeforge::writer::{ListingWriter, TreeWriter};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    match config.mode {
        Mode::List => run_list(&config),
        Mode::Tree => run_tree(&config),
        Mode::Build => run_build(&config),
        Mode::Capture => run_capture(&config),
    }
}

fn run_list(config: &Config) -> Result<()> {
    let walk = TreeEnumerator::new(&config.target_dir, config.exclusion_name.as_str())?;
    let mut writer = ListingWriter::new(io::stdout().lock());
    writer.write_all(walk)?;
    Ok(())
}

fn run_tree(config: &Config) -> Result<()> {
    let writer = TreeWriter::new(config.exclusion_name.as_str(), config.max_depth);

    match &config.output_file {
        Some(out) => {
            let lines = writer.render(&config.target_dir)?;
            fs::write(out, lines.join("\n")).fs_context(out)?;
            println!("Tree saved to: {}", out.display());
        }
        None => writer.write(&config.target_dir, &mut io::stdout().lock())?,
    }

    Ok(())
}

fn run_build(config: &Config) -> Result<()> {
    // Fails before anything is created on disk
    let description = load_description(&config.input_path, config.max_nesting)?;

    let progress = spinner(count_files(&description), "Building");
    let materializer = Materializer::new(Arc::new(progress.clone()));

    let start_time = Instant::now();
    let result = materializer.materialize(&config.output_base_path, &description);
    progress.finish_and_clear();
    let statistics = result?;

    println!(
        "Project generated at: {}",
        config.output_base_path.display()
    );

    if config.stats {
        Reporter::print_report(&RunReport::Build {
            output_dir: config.output_base_path.display().to_string(),
            duration: start_time.elapsed(),
            statistics,
        });
    }

    Ok(())
}

fn run_capture(config: &Config) -> Result<()> {
    let Some(output_file) = &config.output_file else {
        treeforge::bail!(Config, "capture needs an output file");
    };

    let options = CaptureOptions {
        ignore_dirs: config.ignore_dirs.clone(),
        include_patterns: config.include_patterns.clone(),
        skip_file: Some(output_file.clone()),
    };
    let progress = spinner(0, "Capturing");
    let capturer = Capturer::new(options, Arc::new(progress.clone()));

    let start_time = Instant::now();
    let result = capturer.capture(&config.target_dir);
    progress.finish_and_clear();
    let description = result?;

    let json = to_json_string(&description)?;
    fs::write(output_file, json).fs_context(output_file)?;

    println!("Project captured to: {}", output_file.display());

    if config.stats {
        Reporter::print_report(&RunReport::Capture {
            output_file: output_file.display().to_string(),
            duration: start_time.elapsed(),
            directories: count_folders(&description),
            files: count_files(&description),
        });
    }

    Ok(())
}

/// Progress spinner drawn on stderr
fn spinner(length: u64, prefix: &'static str) -> ProgressBar {
    let progress = ProgressBar::new(length);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files")
    {
        progress.set_style(style);
    }
    progress.set_prefix(prefix);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
