//! Shared steps used by the subcommands: config resolution and document I/O.

use std::path::Path;

use hdlconv_config::ConvertConfig;
use hdlconv_objects::{Design, Language};

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, or `hdlconv.toml` from the
/// working directory when present, or the defaults.
pub fn load_config(global: &GlobalArgs) -> Result<ConvertConfig, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => {
            tracing::debug!("loading configuration from {path}");
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read configuration {path}: {e}"))?;
            hdlconv_config::load_config_from_str(&content)?
        }
        None => hdlconv_config::load_config_or_default(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Reads and decodes one design document.
pub fn read_design(path: &Path) -> Result<Design, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let design =
        Design::from_json_str(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(design)
}

/// Picks the source language: explicit choice, then config, then the file
/// name, falling back to VHDL.
pub fn resolve_language(
    explicit: Option<Language>,
    config: &ConvertConfig,
    path: &Path,
) -> Language {
    explicit
        .or(config.input.language)
        .or_else(|| Language::from_path(path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "cannot infer language of {}, assuming vhdl",
                path.display()
            );
            Language::Vhdl
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins() {
        let config = hdlconv_config::load_config_from_str("[input]\nlanguage = \"vhdl\"\n").unwrap();
        let lang = resolve_language(Some(Language::Verilog), &config, Path::new("a.vhd"));
        assert_eq!(lang, Language::Verilog);
    }

    #[test]
    fn config_beats_file_name() {
        let config =
            hdlconv_config::load_config_from_str("[input]\nlanguage = \"verilog\"\n").unwrap();
        let lang = resolve_language(None, &config, Path::new("a.vhd.json"));
        assert_eq!(lang, Language::Verilog);
    }

    #[test]
    fn file_name_then_default() {
        let config = ConvertConfig::default();
        assert_eq!(
            resolve_language(None, &config, Path::new("core.v.json")),
            Language::Verilog
        );
        assert_eq!(
            resolve_language(None, &config, Path::new("design.json")),
            Language::Vhdl
        );
    }

    #[test]
    fn read_design_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"entities\": 3}").unwrap();
        let err = read_design(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn read_design_missing_file() {
        let err = read_design(Path::new("/nonexistent/design.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn explicit_config_path_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\nsort = false\n").unwrap();
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            config: Some(path.display().to_string()),
        };
        let config = load_config(&global).unwrap();
        assert!(!config.output.sort);
    }
}
