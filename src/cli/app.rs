use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI definition for the `cfr` binary.
#[derive(Parser)]
#[command(name = "cfr")]
#[command(about = "Inspection channel file decoder")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Use memory-mapped I/O for reading the input file
    #[arg(long, global = true)]
    pub mmap: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Controls when colored output is emitted.
#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Tree format for the decoded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

/// Handling of a missing `DFP` tag inside an extended indication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DfpMarker {
    /// Consume the three bytes as existing files expect (default)
    Compatible,
    /// Leave the three bytes unread and flag the indication
    Rewind,
    /// Fail the decode
    Reject,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Decode a channel file and print the full document
    Dump {
        /// Path to the channel file
        file: String,

        /// Trace each section to stderr as it is decoded
        #[arg(short, long)]
        verbose: bool,

        /// Output tree format
        #[arg(short, long, default_value = "yaml")]
        format: DocumentFormat,

        /// Behavior when a DFP marker is expected but not found
        #[arg(long = "dfp-marker", default_value = "compatible")]
        dfp_marker: DfpMarker,
    },

    /// Summarize header, section counts and decode diagnostics
    Info {
        /// Path to the channel file
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Behavior when a DFP marker is expected but not found
        #[arg(long = "dfp-marker", default_value = "compatible")]
        dfp_marker: DfpMarker,
    },

    /// Resolve cross-reference IDs and list any that dangle
    Refs {
        /// Path to the channel file
        file: String,

        /// Show every dangling reference instead of a per-kind summary
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Behavior when a DFP marker is expected but not found
        #[arg(long = "dfp-marker", default_value = "compatible")]
        dfp_marker: DfpMarker,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
