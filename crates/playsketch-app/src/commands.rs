//! Subcommand implementations. Each takes document text and returns the
//! text to write, leaving file handling to the caller.

use crate::CliError;
use crate::replay::{parse_script, replay};
use playsketch_core::{EditorConfig, Play, Playbook, Storage, load_playbook, save_playbook};
use playsketch_render::{PrintOptions, SvgOptions, WristCardOptions, print_sheet_html, render_play_svg, wrist_card_html};

pub fn normalize(json: &str) -> Result<String, CliError> {
    let playbook = Playbook::from_json(json)?;
    Ok(playbook.to_json()?)
}

/// Find a play by number (from 1) or by exact name.
pub fn find_play<'a>(playbook: &'a Playbook, selector: &str) -> Result<&'a Play, CliError> {
    let plays = playbook.plays();
    let by_number = selector
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| plays.get(i));
    by_number
        .or_else(|| plays.iter().find(|play| play.name == selector))
        .ok_or_else(|| CliError::PlayNotFound(selector.to_string()))
}

pub fn svg(json: &str, selector: Option<&str>, options: &SvgOptions) -> Result<String, CliError> {
    let playbook = Playbook::from_json(json)?;
    let play = match selector {
        Some(selector) => find_play(&playbook, selector)?,
        None => playbook
            .active_play()
            .ok_or_else(|| CliError::PlayNotFound("active play".to_string()))?,
    };
    Ok(render_play_svg(play, options))
}

pub fn print(json: &str, options: &PrintOptions) -> Result<String, CliError> {
    let playbook = Playbook::from_json(json)?;
    Ok(print_sheet_html(playbook.plays(), options)?)
}

pub fn wrist(json: &str, options: &WristCardOptions) -> Result<String, CliError> {
    let playbook = Playbook::from_json(json)?;
    Ok(wrist_card_html(playbook.plays(), options)?)
}

pub fn replay_script(json: &str, script: &str, config: EditorConfig) -> Result<String, CliError> {
    let playbook = Playbook::from_json(json)?;
    let steps = parse_script(script)?;
    log::info!("Replaying {} steps", steps.len());
    let canvas = replay(playbook, config, &steps);
    Ok(canvas.playbook().to_json()?)
}

/// Store `json` as the local playbook. Returns the number of plays stored.
pub fn import(storage: &dyn Storage, json: &str) -> Result<usize, CliError> {
    let playbook = Playbook::from_json(json)?;
    save_playbook(storage, &playbook)?;
    Ok(playbook.len())
}

pub fn export(storage: &dyn Storage) -> Result<String, CliError> {
    Ok(load_playbook(storage).to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use playsketch_core::storage::MemoryStorage;
    use serde_json::Value;

    const BOOK: &str = r#"[
        {"name": "Dive", "elements": [
            {"type": "player", "x": 150, "y": 148, "label": "QB"},
            {"type": "arrow", "x1": 100, "y1": 300, "x2": 200, "y2": 300}
        ]},
        {"name": "Screen", "los": 3, "elements": []}
    ]"#;

    #[test]
    fn test_normalize_fills_defaults() {
        let out = normalize(r#"[{"elements": [{"type": "ball", "x": 10, "y": 20}]}]"#).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let play = &value[0];
        assert_eq!(play["name"], "Play 1");
        assert_eq!(play["fieldWidthYards"], 30);
        assert_eq!(play["elements"][0]["type"], "ball");
        assert!(play["elements"][0]["id"].is_string());
    }

    #[test]
    fn test_normalize_is_stable() {
        let once = normalize(BOOK).unwrap();
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn test_find_play() {
        let playbook = Playbook::from_json(BOOK).unwrap();
        assert_eq!(find_play(&playbook, "2").unwrap().name, "Screen");
        assert_eq!(find_play(&playbook, "Dive").unwrap().name, "Dive");
        assert!(matches!(find_play(&playbook, "0"), Err(CliError::PlayNotFound(_))));
        assert!(matches!(find_play(&playbook, "Sweep"), Err(CliError::PlayNotFound(_))));
    }

    #[test]
    fn test_svg_defaults_to_first_play() {
        let out = svg(BOOK, None, &SvgOptions::default()).unwrap();
        assert!(out.contains("<title>Dive</title>"));
        assert!(out.contains(">QB</text>"));

        let out = svg(BOOK, Some("Screen"), &SvgOptions::default()).unwrap();
        assert!(out.contains("class=\"los\""));
    }

    #[test]
    fn test_print_and_wrist() {
        let sheet = print(BOOK, &PrintOptions::with_per_page(1)).unwrap();
        assert!(sheet.contains("page 2 of 2"));
        let card = wrist(BOOK, &WristCardOptions::default()).unwrap();
        assert!(card.contains("<span class=\"num\">2</span>"));

        let bad = WristCardOptions {
            columns: 0,
            ..Default::default()
        };
        assert!(matches!(wrist(BOOK, &bad), Err(CliError::Render(_))));
    }

    #[test]
    fn test_bad_document() {
        assert!(matches!(normalize("{\"plays\": 3}"), Err(CliError::Document(_))));
        assert!(matches!(normalize("not json"), Err(CliError::Document(_))));
    }

    #[test]
    fn test_replay_script() {
        let script = r#"[
            {"event": "tool", "tool": "ball"},
            {"event": "pointer_down", "x": 300, "y": 400},
            {"event": "pointer_up", "x": 300, "y": 400}
        ]"#;
        let out = replay_script(BOOK, script, EditorConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let elements = value[0]["elements"].as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[2]["type"], "ball");

        assert!(matches!(
            replay_script(BOOK, "[{\"event\": 1}]", EditorConfig::default()),
            Err(CliError::Script(_))
        ));
    }

    #[test]
    fn test_import_export() {
        let storage = MemoryStorage::new();
        let normalized = normalize(BOOK).unwrap();
        assert_eq!(import(&storage, &normalized).unwrap(), 2);
        assert_eq!(export(&storage).unwrap(), normalized);
    }

    #[test]
    fn test_export_empty_store() {
        let storage = MemoryStorage::new();
        let value: Value = serde_json::from_str(&export(&storage).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
