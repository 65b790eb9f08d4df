mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use itemsel::logging;
use settings::ResolvedConfig;
use workflow::EditorWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    if let Err(err) = logging::initialize(&resolved.log_filter, &resolved.log_file) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    run_editor(cli.output, resolved)
}

/// Run the picker and print the final query in the chosen format.
fn run_editor(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let workflow = EditorWorkflow::from_config(settings)?;
    let outcome = workflow.run()?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
