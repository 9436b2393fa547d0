//! `hdlconv check`: validate design documents.

use std::path::Path;

use crate::pipeline::read_design;
use crate::GlobalArgs;

/// Runs the `hdlconv check` command.
///
/// Every file is checked even after a failure. Returns exit code 0 if all
/// files decode, 1 otherwise.
pub fn run(files: &[String], _global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut failures = 0usize;
    for file in files {
        match read_design(Path::new(file)) {
            Ok(design) => {
                tracing::info!(
                    "{file}: {} entities, {} ports, {} packages, {} architectures",
                    design.entities().len(),
                    design.port_count(),
                    design.package_headers().len(),
                    design.architectures.len()
                );
                for entity in design.entities() {
                    tracing::debug!(
                        "  {}: {} generics, {} ports",
                        entity.name,
                        entity.generics.len(),
                        entity.ports.len()
                    );
                }
            }
            Err(e) => {
                tracing::error!("{e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        tracing::error!("{failures} of {} files failed", files.len());
        return Ok(1);
    }
    Ok(0)
}
