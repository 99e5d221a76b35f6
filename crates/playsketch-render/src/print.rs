//! Print layouts: a paged play sheet and a wrist coach card.
//!
//! Both produce a self-contained HTML document. Each play is embedded as an
//! inline SVG from [`render_play_svg`], sized by CSS so that the browser's
//! print dialog does the pagination and scaling.

use crate::svg::{SvgOptions, escape_xml, render_play_svg};
use crate::{RenderError, RenderResult};
use playsketch_core::Play;
use std::fmt::Write;

/// Layout of the play sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    /// Plays on each printed page.
    pub per_page: usize,
    /// Grid columns on a page.
    pub columns: usize,
    /// Document title, also printed as the page header.
    pub title: String,
    /// Caption each diagram with its play name.
    pub show_names: bool,
    pub svg: SvgOptions,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            per_page: 4,
            columns: 2,
            title: "Playbook".to_string(),
            show_names: true,
            svg: SvgOptions::default(),
        }
    }
}

impl PrintOptions {
    /// Options for `per_page` plays per page, with a roughly square grid.
    pub fn with_per_page(per_page: usize) -> Self {
        Self {
            per_page,
            columns: grid_columns(per_page),
            ..Default::default()
        }
    }
}

/// Layout of the wrist coach card.
#[derive(Debug, Clone, PartialEq)]
pub struct WristCardOptions {
    pub columns: usize,
    /// Card width in inches.
    pub width_in: f64,
    /// Card height in inches.
    pub height_in: f64,
    pub svg: SvgOptions,
}

impl Default for WristCardOptions {
    fn default() -> Self {
        Self {
            columns: 4,
            width_in: 5.0,
            height_in: 3.0,
            svg: SvgOptions::default(),
        }
    }
}

/// Columns of a near-square grid holding `count` cells.
fn grid_columns(count: usize) -> usize {
    let mut columns = 1;
    while columns * columns < count {
        columns += 1;
    }
    columns
}

fn require_positive(name: &'static str, value: usize) -> RenderResult<()> {
    if value == 0 {
        return Err(RenderError::InvalidOption {
            name,
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

fn require_inches(name: &'static str, value: f64) -> RenderResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RenderError::InvalidOption {
            name,
            reason: format!("{value} is not a positive length"),
        });
    }
    Ok(())
}

/// Paged HTML sheet with `per_page` diagrams on each page.
pub fn print_sheet_html(plays: &[Play], options: &PrintOptions) -> RenderResult<String> {
    if plays.is_empty() {
        return Err(RenderError::NoPlays);
    }
    require_positive("per_page", options.per_page)?;
    require_positive("columns", options.columns)?;

    let title = escape_xml(&options.title);
    let pages: Vec<&[Play]> = plays.chunks(options.per_page).collect();
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>{title}</title>");
    let _ = writeln!(out, "<style>");
    let _ = writeln!(out, "@page {{ margin: 0.5in; }}");
    let _ = writeln!(out, "body {{ margin: 0; font-family: sans-serif; }}");
    let _ = writeln!(out, ".page {{ break-after: page; page-break-after: always; }}");
    let _ = writeln!(out, ".page:last-child {{ break-after: auto; page-break-after: auto; }}");
    let _ = writeln!(
        out,
        ".grid {{ display: grid; grid-template-columns: repeat({}, 1fr); gap: 0.25in; }}",
        options.columns
    );
    let _ = writeln!(out, ".play {{ break-inside: avoid; text-align: center; }}");
    let _ = writeln!(out, ".play svg {{ width: 100%; height: auto; border: 1px solid #9ca3af; }}");
    let _ = writeln!(out, "</style></head><body>");

    for (page_index, page) in pages.iter().enumerate() {
        let _ = writeln!(out, "<section class=\"page\">");
        let _ = writeln!(
            out,
            "<header>{title} &middot; page {} of {}</header>",
            page_index + 1,
            pages.len()
        );
        let _ = writeln!(out, "<div class=\"grid\">");
        for play in page.iter() {
            let _ = writeln!(out, "<figure class=\"play\">");
            out.push_str(&render_play_svg(play, &options.svg));
            if options.show_names {
                let _ = writeln!(out, "<figcaption>{}</figcaption>", escape_xml(&play.name));
            }
            let _ = writeln!(out, "</figure>");
        }
        let _ = writeln!(out, "</div>\n</section>");
    }

    out.push_str("</body></html>\n");
    log::debug!("Print sheet: {} plays on {} pages", plays.len(), pages.len());
    Ok(out)
}

/// Wrist coach card: every play in one numbered grid, sized in inches.
pub fn wrist_card_html(plays: &[Play], options: &WristCardOptions) -> RenderResult<String> {
    if plays.is_empty() {
        return Err(RenderError::NoPlays);
    }
    require_positive("columns", options.columns)?;
    require_inches("width_in", options.width_in)?;
    require_inches("height_in", options.height_in)?;

    let rows = plays.len().div_ceil(options.columns);
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>Wrist Coach</title>");
    let _ = writeln!(out, "<style>");
    let _ = writeln!(out, "@page {{ margin: 0.25in; }}");
    let _ = writeln!(out, "body {{ margin: 0; font-family: sans-serif; }}");
    let _ = writeln!(
        out,
        ".card {{ width: {}in; height: {}in; display: grid; grid-template-columns: repeat({}, 1fr); grid-template-rows: repeat({rows}, 1fr); border: 1px solid #111827; box-sizing: border-box; }}",
        options.width_in, options.height_in, options.columns
    );
    let _ = writeln!(
        out,
        ".cell {{ position: relative; overflow: hidden; border: 0.5px solid #9ca3af; }}"
    );
    let _ = writeln!(out, ".cell svg {{ width: 100%; height: 100%; }}");
    let _ = writeln!(
        out,
        ".num {{ position: absolute; top: 1px; left: 2px; font-size: 8pt; font-weight: bold; }}"
    );
    let _ = writeln!(out, "</style></head><body>");
    let _ = writeln!(out, "<div class=\"card\">");

    for (index, play) in plays.iter().enumerate() {
        let _ = writeln!(
            out,
            "<div class=\"cell\" title=\"{}\"><span class=\"num\">{}</span>",
            escape_xml(&play.name),
            index + 1
        );
        out.push_str(&render_play_svg(play, &options.svg));
        let _ = writeln!(out, "</div>");
    }

    out.push_str("</div>\n</body></html>\n");
    log::debug!("Wrist card: {} plays in {} rows", plays.len(), rows);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plays(count: usize) -> Vec<Play> {
        (0..count).map(|i| Play::new(Play::default_name(i))).collect()
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(2), 2);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(6), 3);
        assert_eq!(grid_columns(9), 3);
        assert_eq!(PrintOptions::with_per_page(6).columns, 3);
    }

    #[test]
    fn test_sheet_pages() {
        let html = print_sheet_html(&plays(5), &PrintOptions::default()).unwrap();
        assert_eq!(html.matches("<section class=\"page\">").count(), 2);
        assert_eq!(html.matches("<svg ").count(), 5);
        assert!(html.contains("page 2 of 2"));
        assert!(html.contains("<figcaption>Play 5</figcaption>"));
        assert!(html.contains("grid-template-columns: repeat(2, 1fr)"));
    }

    #[test]
    fn test_sheet_one_per_page() {
        let options = PrintOptions {
            show_names: false,
            ..PrintOptions::with_per_page(1)
        };
        let html = print_sheet_html(&plays(3), &options).unwrap();
        assert_eq!(html.matches("<section class=\"page\">").count(), 3);
        assert!(!html.contains("<figcaption>"));
    }

    #[test]
    fn test_sheet_escapes_names() {
        let mut list = plays(1);
        list[0].name = "<Blitz>".to_string();
        let options = PrintOptions {
            title: "A & B".to_string(),
            ..Default::default()
        };
        let html = print_sheet_html(&list, &options).unwrap();
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<figcaption>&lt;Blitz&gt;</figcaption>"));
    }

    #[test]
    fn test_sheet_rejects_bad_input() {
        assert!(matches!(
            print_sheet_html(&[], &PrintOptions::default()),
            Err(RenderError::NoPlays)
        ));
        let options = PrintOptions {
            per_page: 0,
            ..Default::default()
        };
        assert!(matches!(
            print_sheet_html(&plays(1), &options),
            Err(RenderError::InvalidOption { name: "per_page", .. })
        ));
    }

    #[test]
    fn test_wrist_card_layout() {
        let html = wrist_card_html(&plays(6), &WristCardOptions::default()).unwrap();
        assert!(html.contains(".card { width: 5in; height: 3in;"));
        assert!(html.contains("grid-template-columns: repeat(4, 1fr); grid-template-rows: repeat(2, 1fr)"));
        assert_eq!(html.matches("class=\"cell\"").count(), 6);
        assert!(html.contains("<span class=\"num\">1</span>"));
        assert!(html.contains("<span class=\"num\">6</span>"));
        assert!(!html.contains("<span class=\"num\">7</span>"));
    }

    #[test]
    fn test_wrist_card_fractional_inches() {
        let options = WristCardOptions {
            columns: 3,
            width_in: 4.5,
            height_in: 2.75,
            ..Default::default()
        };
        let html = wrist_card_html(&plays(2), &options).unwrap();
        assert!(html.contains("width: 4.5in; height: 2.75in;"));
        assert!(html.contains("grid-template-rows: repeat(1, 1fr)"));
    }

    #[test]
    fn test_wrist_card_rejects_bad_input() {
        assert!(matches!(
            wrist_card_html(&[], &WristCardOptions::default()),
            Err(RenderError::NoPlays)
        ));
        let options = WristCardOptions {
            height_in: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            wrist_card_html(&plays(1), &options),
            Err(RenderError::InvalidOption { name: "height_in", .. })
        ));
        let options = WristCardOptions {
            columns: 0,
            ..Default::default()
        };
        assert!(matches!(
            wrist_card_html(&plays(1), &options),
            Err(RenderError::InvalidOption { name: "columns", .. })
        ));
    }
}
