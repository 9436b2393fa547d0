//! `hdlconv normalize`: canonicalize a design document.
//!
//! 1. Load config (`--config`, `./hdlconv.toml`, or defaults)
//! 2. Read and decode the input document
//! 3. Canonicalize identifier case for the resolved language
//! 4. Sort generics and ports by name
//! 5. Write the document to `--output` or stdout

use std::path::Path;

use crate::pipeline::{load_config, read_design, resolve_language};
use crate::{GlobalArgs, NormalizeArgs};

/// Runs the `hdlconv normalize` command.
pub fn run(args: &NormalizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let input = Path::new(&args.file);
    let mut design = read_design(input)?;

    let lang = resolve_language(args.lang.map(Into::into), &config, input);
    tracing::debug!("normalizing {} as {lang}", input.display());

    if config.output.normalize_case {
        design.normalize_ids(lang)?;
    }
    if config.output.sort {
        design.sort_interfaces();
    }

    let text = design.to_json_string_indented(config.output.effective_indent())?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .map_err(|e| format!("failed to write {path}: {e}"))?;
            tracing::info!(
                "wrote {} entities to {path}",
                design.entities().len()
            );
        }
        None => println!("{text}"),
    }
    Ok(0)
}
