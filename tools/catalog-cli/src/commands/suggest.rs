//! Search-box completions.

use anyhow::Result;
use catalog_core::suggest::MIN_QUERY_CHARS;

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let suggestions = snapshot.suggestions(&args.query);

    if ctx.output.is_json() {
        ctx.output.json(&suggestions);
        return Ok(());
    }

    if suggestions.is_empty() {
        if args.query.trim().chars().count() < MIN_QUERY_CHARS {
            ctx.output.warn(&format!(
                "Type at least {} characters to get suggestions",
                MIN_QUERY_CHARS
            ));
        } else {
            ctx.output.info("No suggestions.");
        }
        return Ok(());
    }

    for suggestion in &suggestions {
        ctx.output.list_item(suggestion);
    }

    Ok(())
}
