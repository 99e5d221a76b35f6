//! PlaySketch Render Library
//!
//! Static renderers for PlaySketch plays: a standalone SVG snapshot of one
//! play, and HTML print layouts (a multi-play sheet and a wrist coach card)
//! built from those snapshots.

pub mod print;
pub mod svg;

pub use print::{PrintOptions, WristCardOptions, print_sheet_html, wrist_card_html};
pub use svg::{SvgOptions, YardLineStyle, escape_xml, render_play_svg};

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to render: no plays given")]
    NoPlays,
    #[error("Invalid layout option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
