/*!
 * treeforge - list directory trees and materialize them from JSON descriptions
 *
 * The enumerator walks an existing tree while pruning a dependency folder,
 * and the materializer rebuilds a tree on disk from a nested description.
 * Capture produces such a description from an existing directory.
 */

pub mod capture;
pub mod config;
pub mod description;
pub mod enumerator;
pub mod error;
pub mod materializer;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use capture::{CaptureOptions, Capturer};
pub use config::Config;
pub use description::{load_description, parse_description, to_json_string};
pub use enumerator::TreeEnumerator;
pub use error::{Result, TreeForgeError};
pub use materializer::{MaterializeStatistics, Materializer};
pub use report::{Reporter, RunReport};
pub use types::{DescriptionNode, DirectoryListing, TreeDescription};
pub use writer::{ListingWriter, TreeWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
