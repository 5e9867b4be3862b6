/*!
 * Reporting functionality for treeforge
 *
 * Renders a summary table of a build or capture run using the tabled
 * library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::materializer::MaterializeStatistics;
use crate::utils::format_file_size;

/// Summary of a single run
#[derive(Debug, Clone)]
pub enum RunReport {
    /// A description materialized on disk
    Build {
        output_dir: String,
        duration: Duration,
        statistics: MaterializeStatistics,
    },
    /// A directory captured into a description file
    Capture {
        output_file: String,
        duration: Duration,
        directories: usize,
        files: u64,
    },
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Generate the summary table for a run
    pub fn generate_report(report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = match report {
            RunReport::Build {
                output_dir,
                duration,
                statistics,
            } => vec![
                SummaryRow {
                    key: "Output Directory",
                    value: output_dir.clone(),
                },
                SummaryRow {
                    key: "Process Time",
                    value: format!("{:.4?}", duration),
                },
                SummaryRow {
                    key: "Directories Created",
                    value: statistics.directories_created.to_string(),
                },
                SummaryRow {
                    key: "Directories Reused",
                    value: statistics.directories_reused.to_string(),
                },
                SummaryRow {
                    key: "Files Written",
                    value: statistics.files_written.to_string(),
                },
                SummaryRow {
                    key: "Content Size",
                    value: format_file_size(statistics.bytes_written),
                },
            ],
            RunReport::Capture {
                output_file,
                duration,
                directories,
                files,
            } => vec![
                SummaryRow {
                    key: "Output File",
                    value: output_file.clone(),
                },
                SummaryRow {
                    key: "Process Time",
                    value: format!("{:.4?}", duration),
                },
                SummaryRow {
                    key: "Directories",
                    value: directories.to_string(),
                },
                SummaryRow {
                    key: "Files Captured",
                    value: files.to_string(),
                },
            ],
        };

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    /// Print the report to stdout
    pub fn print_report(report: &RunReport) {
        println!("\n{}", Self::generate_report(report));
    }
}
