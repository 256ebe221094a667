//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::input::{count_chars, demo_alphabet, parse_pairs};
use crate::application::render::{escape_symbol, to_display_tree};
use crate::application::HuffmanService;
use crate::cli::args::{AlphabetArgs, Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CodeTable, Symbol};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Codes(args)) => cmd_codes(cli, args),
        Some(Commands::Tree(args)) => cmd_tree(cli, args),
        Some(Commands::Stats(args)) => cmd_stats(cli, args),
        Some(Commands::Demo) => cmd_demo(cli),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage("no command given, see --help".to_string())),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let project_dir = cli
        .project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    Ok(Settings::load(project_dir.as_deref())?)
}

fn service(cli: &Cli, sort: bool) -> CliResult<HuffmanService> {
    let mut settings = load_settings(cli)?;
    if sort {
        settings.sort_input = true;
    }
    debug!("settings: {:?}", settings);
    Ok(HuffmanService::new(settings))
}

/// Resolve the alphabet from `--text` or from SYMBOL:FREQ pairs.
pub fn alphabet(args: &AlphabetArgs) -> CliResult<Vec<Symbol<String>>> {
    match &args.text {
        Some(text) if text.is_empty() => Err(CliError::InvalidArgs("text is empty".to_string())),
        Some(text) => Ok(count_chars(text)),
        None if args.pairs.is_empty() => Err(CliError::InvalidArgs(
            "give SYMBOL:FREQ pairs or --text".to_string(),
        )),
        None => Ok(parse_pairs(&args.pairs)?),
    }
}

fn print_codes(table: &CodeTable<String>, separator: &str) {
    for entry in table {
        output::code(&escape_symbol(&entry.symbol), separator, &entry.code);
    }
}

#[instrument(skip(cli))]
fn cmd_codes(cli: &Cli, args: &AlphabetArgs) -> CliResult<()> {
    let service = service(cli, args.sort)?;
    let table = service.codes(alphabet(args)?)?;
    print_codes(&table, &service.settings().separator);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, args: &AlphabetArgs) -> CliResult<()> {
    let service = service(cli, args.sort)?;
    let tree = service.build_tree(alphabet(args)?)?;
    output::info(&to_display_tree(&tree));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_stats(cli: &Cli, args: &AlphabetArgs) -> CliResult<()> {
    let service = service(cli, args.sort)?;
    let summary = service.summary(alphabet(args)?)?;
    output::header("Huffman code");
    output::field("symbols", &summary.symbols);
    output::field("nodes", &summary.nodes);
    output::field("max length", &summary.depth);
    output::field("total weight", &summary.total_weight);
    output::field("weighted bits", &summary.weighted_length);
    output::field("bits/symbol", &format!("{:.4}", summary.average_length));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_demo(cli: &Cli) -> CliResult<()> {
    let service = service(cli, false)?;
    let table = service.codes(demo_alphabet())?;
    print_codes(&table, &service.settings().separator);
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("global", &path.display()),
                None => output::field("global", &"(no config directory)"),
            }
            let project_dir = cli
                .project_dir
                .clone()
                .or_else(|| std::env::current_dir().ok());
            if let Some(dir) = project_dir {
                output::field("local", &local_config_path(&dir).display());
            }
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[&str], text: Option<&str>) -> AlphabetArgs {
        AlphabetArgs {
            pairs: pairs.iter().map(|s| s.to_string()).collect(),
            text: text.map(str::to_string),
            sort: false,
        }
    }

    #[test]
    fn given_text_when_resolving_alphabet_then_counts_characters() {
        let symbols = alphabet(&args(&[], Some("aab"))).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[1].value, "a");
        assert_eq!(symbols[1].frequency, 2);
    }

    #[test]
    fn given_empty_text_when_resolving_alphabet_then_invalid_args() {
        let result = alphabet(&args(&[], Some("")));
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_pairs_when_resolving_alphabet_then_parses() {
        let symbols = alphabet(&args(&["a:1", "b:2"], None)).unwrap();
        assert_eq!(symbols.len(), 2);
    }
}
