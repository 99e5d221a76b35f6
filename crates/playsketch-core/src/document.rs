//! Plays and the playbook that holds them.
//!
//! A [`Playbook`] is the complete undoable state of the designer: the plays
//! and which of them is active. Documents coming from storage or import are
//! repaired on the way in, never trusted.

use crate::elements::{Element, ElementId, normalize_value};
use crate::field::{DEFAULT_LENGTH_YARDS, DEFAULT_WIDTH_YARDS, FieldSize, coerce_yards, compute_field_size};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for plays.
pub type PlayId = Uuid;

/// Errors raised when reading a playbook document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("expected a JSON array of plays")]
    NotAnArray,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document contains no plays")]
    Empty,
}

/// A single play diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    id: PlayId,
    pub name: String,
    size: FieldSize,
    los: Option<u32>,
    field_width_yards: u32,
    field_length_yards: u32,
    elements: Vec<Element>,
}

impl Play {
    /// An empty play with the default field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size: FieldSize::default(),
            los: None,
            field_width_yards: DEFAULT_WIDTH_YARDS,
            field_length_yards: DEFAULT_LENGTH_YARDS,
            elements: Vec::new(),
        }
    }

    /// Default name for the play at `index` (zero-based).
    pub fn default_name(index: usize) -> String {
        format!("Play {}", index + 1)
    }

    /// Repair a play from arbitrary JSON. `index` picks the fallback name.
    pub fn from_value(value: &Value, index: usize) -> Self {
        let yards = |keys: &[&str], default: u32| {
            keys.iter()
                .find_map(|k| value.get(*k).and_then(json_number))
                .map_or(default, coerce_yards)
        };
        let field_width_yards = yards(&["fieldWidthYards", "widthYards"], DEFAULT_WIDTH_YARDS);
        let field_length_yards = yards(&["fieldLengthYards", "divisions"], DEFAULT_LENGTH_YARDS);

        let id = value
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        let name = match value.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => Self::default_name(index),
        };
        let elements = value
            .get("elements")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(normalize_value).collect())
            .unwrap_or_default();

        let mut play = Self {
            id,
            name,
            size: compute_field_size(f64::from(field_width_yards), f64::from(field_length_yards)),
            los: None,
            field_width_yards,
            field_length_yards,
            elements,
        };
        play.set_line_of_scrimmage(
            value
                .get("los")
                .and_then(json_number)
                .map(|n| n.round() as i64),
        );
        play.ensure_unique_ids();
        play
    }

    pub fn id(&self) -> PlayId {
        self.id
    }

    /// Pixel size of the canvas, derived from the yard dimensions.
    pub fn size(&self) -> FieldSize {
        self.size
    }

    /// Line-of-scrimmage row, `None` when hidden.
    pub fn los(&self) -> Option<u32> {
        self.los
    }

    pub fn field_width_yards(&self) -> u32 {
        self.field_width_yards
    }

    /// Field length in yards, which is also the number of row divisions.
    pub fn field_length_yards(&self) -> u32 {
        self.field_length_yards
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Replace the whole element list.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.ensure_unique_ids();
    }

    /// Copy of the element list with `element` appended.
    pub fn with_element(&self, element: Element) -> Vec<Element> {
        let mut elements = self.elements.clone();
        elements.push(element);
        elements
    }

    /// Copy of the element list with the element `id` replaced.
    pub fn with_replaced(&self, id: ElementId, element: Element) -> Vec<Element> {
        self.elements
            .iter()
            .map(|e| if e.id() == id { element.clone() } else { e.clone() })
            .collect()
    }

    /// Copy of the element list without the element `id`.
    pub fn without(&self, id: ElementId) -> Vec<Element> {
        self.elements.iter().filter(|e| e.id() != id).cloned().collect()
    }

    pub fn set_field_width(&mut self, yards: f64) {
        self.field_width_yards = coerce_yards(yards);
        self.recompute_size();
    }

    /// Changing the length also re-clamps the line of scrimmage.
    pub fn set_field_length(&mut self, yards: f64) {
        self.field_length_yards = coerce_yards(yards);
        self.recompute_size();
        if let Some(los) = self.los {
            self.los = Some(los.min(self.field_length_yards));
        }
    }

    /// Set the line of scrimmage, clamped to `0..=field_length_yards`.
    pub fn set_line_of_scrimmage(&mut self, row: Option<i64>) {
        self.los = row.map(|r| r.clamp(0, i64::from(self.field_length_yards)) as u32);
    }

    fn recompute_size(&mut self) {
        self.size = compute_field_size(
            f64::from(self.field_width_yards),
            f64::from(self.field_length_yards),
        );
    }

    /// Re-issue identifiers that collide with an earlier element.
    pub fn ensure_unique_ids(&mut self) {
        let mut seen = HashSet::new();
        for element in &mut self.elements {
            if !seen.insert(element.id()) {
                log::warn!("Re-issuing duplicate element id {} in play {}", element.id(), self.name);
                element.regenerate_id();
                seen.insert(element.id());
            }
        }
    }

    /// Deep copy with fresh identifiers for the play and all its elements.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.name = format!("{} (copy)", self.name);
        for element in &mut copy.elements {
            element.regenerate_id();
        }
        copy
    }
}

impl Default for Play {
    fn default() -> Self {
        Self::new(Self::default_name(0))
    }
}

impl<'de> Deserialize<'de> for Play {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Play::from_value(&value, 0))
    }
}

fn json_number(value: &Value) -> Option<f64> {
    let n: f64 = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Parse an imported document: a JSON array of plays.
///
/// Every play and element is repaired. Array entries that are not objects
/// are dropped.
pub fn parse_plays(json: &str) -> Result<Vec<Play>, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    plays_from_value(&value)
}

/// Like [`parse_plays`], from an already-parsed value.
pub fn plays_from_value(value: &Value) -> Result<Vec<Play>, DocumentError> {
    let items = value.as_array().ok_or(DocumentError::NotAnArray)?;
    let mut plays: Vec<Play> = items
        .iter()
        .filter(|item| {
            let keep = item.is_object();
            if !keep {
                log::warn!("Dropping non-object play entry: {item}");
            }
            keep
        })
        .enumerate()
        .map(|(index, item)| Play::from_value(item, index))
        .collect();
    if plays.is_empty() {
        return Err(DocumentError::Empty);
    }

    let mut seen = HashSet::new();
    for play in &mut plays {
        if !seen.insert(play.id) {
            play.id = Uuid::new_v4();
            seen.insert(play.id);
        }
    }
    Ok(plays)
}

/// The whole editable document: all plays and the active one.
///
/// A playbook always holds at least one play, and the active id, when set,
/// names one of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playbook {
    plays: Vec<Play>,
    active_play_id: Option<PlayId>,
}

impl Default for Playbook {
    fn default() -> Self {
        Self::from_plays(Vec::new())
    }
}

impl Playbook {
    /// Build a playbook, adding a default play if `plays` is empty. The
    /// first play becomes active.
    pub fn from_plays(mut plays: Vec<Play>) -> Self {
        if plays.is_empty() {
            plays.push(Play::default());
        }
        let active_play_id = plays.first().map(Play::id);
        Self { plays, active_play_id }
    }

    /// Parse an imported JSON array of plays.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        parse_plays(json).map(Self::from_plays)
    }

    /// Serialize the plays as a JSON array.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.plays)?)
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn active_play_id(&self) -> Option<PlayId> {
        self.active_play_id
    }

    pub fn play(&self, id: PlayId) -> Option<&Play> {
        self.plays.iter().find(|p| p.id == id)
    }

    pub fn play_mut(&mut self, id: PlayId) -> Option<&mut Play> {
        self.plays.iter_mut().find(|p| p.id == id)
    }

    pub fn play_index(&self, id: PlayId) -> Option<usize> {
        self.plays.iter().position(|p| p.id == id)
    }

    pub fn active_play(&self) -> Option<&Play> {
        self.play(self.active_play_id?)
    }

    pub fn active_play_mut(&mut self) -> Option<&mut Play> {
        let id = self.active_play_id?;
        self.play_mut(id)
    }

    /// Append an empty play and make it active.
    pub fn add_play(&mut self) -> PlayId {
        let play = Play::new(Play::default_name(self.plays.len()));
        let id = play.id;
        self.plays.push(play);
        self.active_play_id = Some(id);
        id
    }

    /// Copy a play, insert the copy after it and make it active.
    pub fn duplicate_play(&mut self, id: PlayId) -> Option<PlayId> {
        let index = self.play_index(id)?;
        let copy = self.plays[index].duplicate();
        let copy_id = copy.id;
        self.plays.insert(index + 1, copy);
        self.active_play_id = Some(copy_id);
        Some(copy_id)
    }

    /// Delete a play. The last remaining play cannot be deleted.
    ///
    /// If the active play is deleted, the play that takes its place (or the
    /// one before it, at the end of the list) becomes active.
    pub fn delete_play(&mut self, id: PlayId) -> bool {
        if self.plays.len() <= 1 {
            return false;
        }
        let Some(index) = self.play_index(id) else {
            return false;
        };
        self.plays.remove(index);
        if self.active_play_id == Some(id) {
            let next = index.min(self.plays.len() - 1);
            self.active_play_id = Some(self.plays[next].id);
        }
        true
    }

    pub fn select_play(&mut self, id: PlayId) -> bool {
        if self.play_index(id).is_none() {
            return false;
        }
        self.active_play_id = Some(id);
        true
    }

    pub fn rename_play(&mut self, id: PlayId, name: impl Into<String>) -> bool {
        match self.play_mut(id) {
            Some(play) => {
                play.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Re-establish the active-play invariant after outside edits.
    pub fn repair(&mut self) {
        if self.plays.is_empty() {
            self.plays.push(Play::default());
        }
        let valid = self.active_play_id.is_some_and(|id| self.play_index(id).is_some());
        if !valid {
            self.active_play_id = self.plays.first().map(Play::id);
        }
    }
}

impl<'de> Deserialize<'de> for Playbook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let plays = match &value {
            Value::Object(map) => map.get("plays").cloned().unwrap_or(Value::Null),
            _ => value.clone(),
        };
        let plays = plays_from_value(&plays).unwrap_or_default();
        let mut playbook = Playbook {
            plays,
            active_play_id: value
                .get("activePlayId")
                .and_then(Value::as_str)
                .and_then(|s| Uuid::parse_str(s).ok()),
        };
        playbook.repair();
        Ok(playbook)
    }
}
