//! Scripted editing sessions.
//!
//! A script is a JSON array of steps, each tagged by `event`:
//!
//! ```json
//! [
//!   {"event": "tool", "tool": "player"},
//!   {"event": "pointer_down", "x": 150, "y": 150},
//!   {"event": "pointer_up", "x": 150, "y": 150},
//!   {"event": "key", "key": "z", "ctrl": true}
//! ]
//! ```
//!
//! Pointer coordinates are field pixels: the canvas is mounted with an
//! identity view.

use kurbo::Point;
use playsketch_core::{Canvas, EditorConfig, KeyPress, Modifiers, Playbook, PointerEvent, ToolKind, ViewTransform};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Step {
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },
    Tool {
        tool: ToolKind,
    },
    LockPlayers {
        locked: bool,
    },
    AddPlay,
    /// Play number, counting from 1.
    SelectPlay {
        index: usize,
    },
    RenamePlay {
        name: String,
    },
    FieldWidth {
        yards: f64,
    },
    FieldLength {
        yards: f64,
    },
    LineOfScrimmage {
        #[serde(default)]
        row: Option<i64>,
    },
}

pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Run `steps` against a mounted canvas over `playbook`.
pub fn replay(playbook: Playbook, config: EditorConfig, steps: &[Step]) -> Canvas {
    let mut canvas = Canvas::with_config(playbook, config);
    canvas.mount(ViewTransform::identity());
    for step in steps {
        apply_step(&mut canvas, step);
    }
    canvas.unmount();
    canvas
}

pub fn apply_step(canvas: &mut Canvas, step: &Step) {
    match step {
        Step::PointerDown { x, y } => canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(*x, *y),
        }),
        Step::PointerMove { x, y } => canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(*x, *y),
        }),
        Step::PointerUp { x, y } => canvas.handle_pointer(PointerEvent::Up {
            position: Point::new(*x, *y),
        }),
        Step::Key { key, ctrl, shift, meta } => {
            let modifiers = Modifiers {
                shift: *shift,
                ctrl: *ctrl,
                alt: false,
                meta: *meta,
            };
            if !canvas.handle_key(&KeyPress::with_modifiers(key.clone(), modifiers)) {
                log::debug!("Key {key:?} had no effect");
            }
        }
        Step::Tool { tool } => canvas.set_tool(*tool),
        Step::LockPlayers { locked } => canvas.set_players_locked(*locked),
        Step::AddPlay => {
            canvas.add_play();
        }
        Step::SelectPlay { index } => {
            let id = index
                .checked_sub(1)
                .and_then(|i| canvas.playbook().plays().get(i))
                .map(|play| play.id());
            match id {
                Some(id) => {
                    canvas.select_play(id);
                }
                None => log::warn!("No play number {index}, step skipped"),
            }
        }
        Step::RenamePlay { name } => {
            if let Some(id) = canvas.playbook().active_play_id() {
                canvas.rename_play(id, name);
            }
        }
        Step::FieldWidth { yards } => {
            canvas.set_field_width(*yards);
        }
        Step::FieldLength { yards } => {
            canvas.set_field_length(*yards);
        }
        Step::LineOfScrimmage { row } => {
            canvas.set_line_of_scrimmage(*row);
        }
    }
}
