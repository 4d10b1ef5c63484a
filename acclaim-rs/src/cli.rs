//! Root CLI structure for acclaim-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acclaim-rs")]
#[command(about = "Command-line tools for Acclaim ASF/AMC motion capture files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ASF skeleton operations
    Asf {
        #[command(subcommand)]
        command: crate::commands::asf::AsfCommands,
    },

    /// AMC motion operations
    Amc {
        #[command(subcommand)]
        command: crate::commands::amc::AmcCommands,
    },

    /// Export world-space bone segments as JSON
    Pose(crate::commands::pose::PoseArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
