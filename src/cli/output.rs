use anyhow::Result;
use itemsel::ui::EditorOutcome;
use serde_json::json;

/// Print the stored item id, or a note when nothing was stored.
pub(crate) fn print_plain(outcome: &EditorOutcome) {
    match (&outcome.query.item_id, &outcome.selection) {
        (Some(id), Some(selection)) => println!("{id}\t{}", selection.label),
        (Some(id), None) => println!("{id}"),
        (None, _) => println!("No item selected"),
    }
}

pub(crate) fn format_outcome_json(outcome: &EditorOutcome) -> Result<String> {
    let payload = json!({
        "query": outcome.query,
        "selection": outcome.selection,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &EditorOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
