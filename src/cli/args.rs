//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Huffman code table generator: builds an optimal prefix-free code for an alphabet
#[derive(Parser, Debug)]
#[command(name = "huffgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .huffgen.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the code of every symbol
    Codes(AlphabetArgs),

    /// Show the Huffman tree
    Tree(AlphabetArgs),

    /// Show code statistics
    Stats(AlphabetArgs),

    /// Print codes for the textbook alphabet a:5 b:9 c:12 d:13 e:16 f:45
    Demo,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Alphabet given either as SYMBOL:FREQ pairs or as text to count.
#[derive(Args, Debug, Clone)]
pub struct AlphabetArgs {
    /// SYMBOL:FREQ pairs, ascending by frequency (\s, \t, \n for whitespace)
    #[arg(conflicts_with = "text", required_unless_present = "text")]
    pub pairs: Vec<String>,

    /// Count the characters of TEXT instead of taking pairs
    #[arg(short, long)]
    pub text: Option<String>,

    /// Sort pairs by frequency before building
    #[arg(short, long)]
    pub sort: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}
