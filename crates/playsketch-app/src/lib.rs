//! PlaySketch App
//!
//! Native command-line shell over the PlaySketch core: playbook repair,
//! SVG and print exports, the local store, and scripted editing sessions.

pub mod cli;
pub mod commands;
pub mod replay;

pub use cli::{Cli, Command, IoArgs};

use playsketch_core::storage::FileStorage;
use playsketch_core::{ConfigError, DocumentError, EditorConfig, StorageError};
use playsketch_render::{PrintOptions, RenderError, SvgOptions, WristCardOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid playbook: {0}")]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("No play matches {0:?}")]
    PlayNotFound(String),
    #[error("Invalid replay script: {0}")]
    Script(#[from] serde_json::Error),
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn open_store(dir: Option<&Path>) -> Result<FileStorage, CliError> {
    Ok(match dir {
        Some(dir) => FileStorage::new(dir.to_path_buf())?,
        None => FileStorage::default_location()?,
    })
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Normalize(io) => {
            let out = commands::normalize(&read(&io.input)?)?;
            write_output(io.output.as_deref(), &out)
        }
        Command::Svg { io, play, scale, title } => {
            let options = SvgOptions {
                scale,
                show_title: title,
                ..Default::default()
            };
            let out = commands::svg(&read(&io.input)?, play.as_deref(), &options)?;
            write_output(io.output.as_deref(), &out)
        }
        Command::Print { io, per_page } => {
            let out = commands::print(&read(&io.input)?, &PrintOptions::with_per_page(per_page))?;
            write_output(io.output.as_deref(), &out)
        }
        Command::Wrist {
            io,
            columns,
            width_in,
            height_in,
        } => {
            let options = WristCardOptions {
                columns,
                width_in,
                height_in,
                ..Default::default()
            };
            let out = commands::wrist(&read(&io.input)?, &options)?;
            write_output(io.output.as_deref(), &out)
        }
        Command::Replay { io, script } => {
            let out = commands::replay_script(&read(&io.input)?, &read(&script)?, config)?;
            write_output(io.output.as_deref(), &out)
        }
        Command::Import { input } => {
            let storage = open_store(cli.store.as_deref())?;
            let count = commands::import(&storage, &read(&input)?)?;
            log::info!("Stored {count} plays in {}", storage.base_path().display());
            Ok(())
        }
        Command::Export { output } => {
            let storage = open_store(cli.store.as_deref())?;
            let out = commands::export(&storage)?;
            write_output(output.as_deref(), &out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("playsketch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_run_normalize_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("book.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, r#"[{"name": "Sweep"}]"#).unwrap();

        run(parse(&["normalize", input.to_str().unwrap(), "-o", output.to_str().unwrap()])).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"name\": \"Sweep\""));
    }

    #[test]
    fn test_run_missing_input() {
        let err = run(parse(&["normalize", "/definitely/not/here.json"])).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_run_bad_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"historyCapacity": 0}"#).unwrap();
        let err = run(parse(&["normalize", "x.json", "--config", config.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_run_import_export_with_store() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("store");
        let input = dir.path().join("book.json");
        let output = dir.path().join("export.json");
        std::fs::write(&input, r#"[{"name": "Dive"}, {"name": "Counter"}]"#).unwrap();

        run(parse(&["import", input.to_str().unwrap(), "--store", store.to_str().unwrap()])).unwrap();
        run(parse(&["export", "-o", output.to_str().unwrap(), "--store", store.to_str().unwrap()])).unwrap();

        let exported = std::fs::read_to_string(&output).unwrap();
        assert!(exported.contains("Dive"));
        assert!(exported.contains("Counter"));
    }

    #[test]
    fn test_run_replay_with_config() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("book.json");
        let script = dir.path().join("script.json");
        let config = dir.path().join("config.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, "[{}]").unwrap();
        std::fs::write(&config, r#"{"minLineLength": 50}"#).unwrap();
        std::fs::write(
            &script,
            r#"[
                {"event": "tool", "tool": "line"},
                {"event": "pointer_down", "x": 100, "y": 300},
                {"event": "pointer_up", "x": 130, "y": 300}
            ]"#,
        )
        .unwrap();

        run(parse(&[
            "replay",
            input.to_str().unwrap(),
            script.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        // 30px is below the configured minimum
        assert!(value[0]["elements"].as_array().unwrap().is_empty());
    }
}
