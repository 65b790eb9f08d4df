use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use itemsel::app_dirs;

/// Produce the full version banner including the resolved directories.
fn long_version() -> &'static str {
    let dirs = [
        ("config", app_dirs::get_config_dir()),
        ("data", app_dirs::get_data_dir()),
        ("cache", app_dirs::get_cache_dir()),
    ];

    let mut details = format!("itemsel {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    for (name, dir) in dirs {
        let dir = match dir {
            Ok(path) => path.display().to_string(),
            Err(err) => format!("unavailable ({err})"),
        };
        let _ = writeln!(details, "{name} directory: {dir}");
    }

    Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "itemsel",
    version,
    long_version = long_version(),
    about = "Pick the item a query runs against, keeping the stored item id in sync",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `itemsel` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "ITEMSEL_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "PATH",
        help = "Line-delimited JSON item database (default: <data dir>/itemdb.ljson)"
    )]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        short = 'q',
        long = "query-file",
        value_name = "PATH",
        help = "JSON file holding the query to edit (default: in-memory query)"
    )]
    pub(crate) query_file: Option<PathBuf>,
    #[arg(
        short = 'i',
        long = "item-id",
        value_name = "ID",
        help = "Item id to start from, replacing the stored one (default: stored id)"
    )]
    pub(crate) item_id: Option<u64>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the prompt title (default: Item)"
    )]
    pub(crate) title: Option<String>,
    #[arg(long = "print-config", help = "Print the effective configuration")]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how the final query is printed"
    )]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = CliArgs::parse_from(["itemsel", "-n", "-i", "4151", "-o", "json", "-q", "q.json"]);
        assert!(cli.no_config);
        assert_eq!(cli.item_id, Some(4151));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.query_file, Some(PathBuf::from("q.json")));
    }
}
