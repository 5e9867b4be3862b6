/*!
 * Configuration handling for treeforge
 */

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::description::DEFAULT_MAX_NESTING;
use crate::enumerator::DEFAULT_EXCLUSION;
use crate::error::{require_directory, Result};
use crate::utils::{to_owned_list, DEFAULT_IGNORE_DIRS, DEFAULT_INCLUDE_PATTERNS};

/// Default description file read by `build`
pub const DEFAULT_INPUT_FILE: &str = "proyecto_corregido.json";

/// Default directory `build` writes into
pub const DEFAULT_OUTPUT_DIR: &str = "NuevoProyectoCorregido";

/// Default description file written by `capture`
pub const DEFAULT_CAPTURE_FILE: &str = "proyecto.json";

/// Default depth of the `tree` rendering
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// Command-line arguments for treeforge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "treeforge",
    version = env!("CARGO_PKG_VERSION"),
    about = "List directory trees and materialize them from JSON descriptions",
    long_about = "Lists directory trees while skipping dependency folders, captures projects into JSON descriptions, and rebuilds directory trees from those descriptions."
)]
pub struct Args {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every directory and the files it contains
    List(ListArgs),
    /// Print a tree-style view of a directory
    Tree(TreeArgs),
    /// Create a directory tree from a JSON description
    Build(BuildArgs),
    /// Capture a directory into a JSON description
    Capture(CaptureArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// Directory to list
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Directory name skipped at every level
    #[clap(long, default_value = DEFAULT_EXCLUSION)]
    pub exclude: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TreeArgs {
    /// Directory to render
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Number of directory levels expanded below the root's children
    #[clap(long, default_value_t = DEFAULT_TREE_DEPTH)]
    pub depth: usize,

    /// Write the tree to this file instead of stdout
    #[clap(long)]
    pub out: Option<String>,

    /// Entry name left out of the tree
    #[clap(long, default_value = DEFAULT_EXCLUSION)]
    pub exclude: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BuildArgs {
    /// JSON description to read
    #[clap(default_value = DEFAULT_INPUT_FILE)]
    pub input_file: String,

    /// Directory the tree is created in
    #[clap(default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Maximum folder nesting accepted in the description
    #[clap(long, default_value_t = DEFAULT_MAX_NESTING)]
    pub max_nesting: usize,

    /// Print a summary table after building
    #[clap(long)]
    pub stats: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CaptureArgs {
    /// Directory to capture
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// JSON description to write
    #[clap(default_value = DEFAULT_CAPTURE_FILE)]
    pub output_file: String,

    /// Comma-separated list of directory names to skip
    #[clap(long, value_delimiter = ',')]
    pub ignore_dirs: Option<Vec<String>>,

    /// Comma-separated list of file name patterns to keep (empty keeps every file)
    #[clap(long, value_delimiter = ',')]
    pub include_patterns: Option<Vec<String>>,

    /// Print a summary table after capturing
    #[clap(long)]
    pub stats: bool,
}

/// Which operation a [`Config`] drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Tree,
    Build,
    Capture,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Operation to run
    pub mode: Mode,

    /// Directory walked by list, tree and capture
    pub target_dir: PathBuf,

    /// Description read by build
    pub input_path: PathBuf,

    /// Directory build writes into
    pub output_base_path: PathBuf,

    /// File written by tree (optional) and capture
    pub output_file: Option<PathBuf>,

    /// Directory name skipped by list and tree
    pub exclusion_name: String,

    /// Levels expanded by tree
    pub max_depth: usize,

    /// Nesting accepted by build
    pub max_nesting: usize,

    /// Directory names skipped by capture
    pub ignore_dirs: Vec<String>,

    /// File name patterns kept by capture
    pub include_patterns: Vec<String>,

    /// Print a summary table
    pub stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::List,
            target_dir: PathBuf::from("."),
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_base_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: None,
            exclusion_name: DEFAULT_EXCLUSION.to_string(),
            max_depth: DEFAULT_TREE_DEPTH,
            max_nesting: DEFAULT_MAX_NESTING,
            ignore_dirs: to_owned_list(&DEFAULT_IGNORE_DIRS),
            include_patterns: to_owned_list(&DEFAULT_INCLUDE_PATTERNS),
            stats: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let defaults = Self::default();

        match args.command {
            Command::List(list) => Self {
                mode: Mode::List,
                target_dir: PathBuf::from(list.directory_path),
                exclusion_name: list.exclude,
                ..defaults
            },
            Command::Tree(tree) => Self {
                mode: Mode::Tree,
                target_dir: PathBuf::from(tree.directory_path),
                output_file: tree.out.map(PathBuf::from),
                exclusion_name: tree.exclude,
                max_depth: tree.depth,
                ..defaults
            },
            Command::Build(build) => Self {
                mode: Mode::Build,
                input_path: PathBuf::from(build.input_file),
                output_base_path: PathBuf::from(build.output_dir),
                max_nesting: build.max_nesting,
                stats: build.stats,
                ..defaults
            },
            Command::Capture(capture) => Self {
                mode: Mode::Capture,
                target_dir: PathBuf::from(capture.directory_path),
                output_file: Some(PathBuf::from(capture.output_file)),
                ignore_dirs: capture.ignore_dirs.unwrap_or_else(|| defaults.ignore_dirs.clone()),
                include_patterns: capture
                    .include_patterns
                    .map(|patterns| patterns.into_iter().filter(|p| !p.is_empty()).collect())
                    .unwrap_or_else(|| defaults.include_patterns.clone()),
                stats: capture.stats,
                ..defaults
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            Mode::List | Mode::Tree => {
                crate::ensure!(
                    !self.exclusion_name.is_empty(),
                    Config,
                    "exclusion name must not be empty"
                );
                require_directory(&self.target_dir)?;
            }
            Mode::Build => {
                crate::ensure!(
                    self.max_nesting > 0,
                    Config,
                    "maximum nesting must be at least 1"
                );
            }
            Mode::Capture => {
                require_directory(&self.target_dir)?;
            }
        }

        // Check if output file directory exists
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                crate::ensure!(
                    parent == Path::new("") || parent.is_dir(),
                    Config,
                    "output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}
