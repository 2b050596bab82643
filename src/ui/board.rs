//! Two-column rendering of the day's board.

use crate::core::aggregate::Board;
use crate::utils::formatting::{pad_right, visible_width};
use ansi_term::Colour;
use chrono::NaiveDate;
use serde_json::json;

const MIN_COLUMN: usize = 24;
const GUTTER: usize = 4;

fn yes_lines(board: &Board<'_>) -> Vec<String> {
    let mut lines = vec![
        Colour::Green
            .bold()
            .paint(format!("YES :) ({})", board.yes.len()))
            .to_string(),
    ];
    for r in &board.yes {
        lines.push(Colour::Green.paint(r.name.as_str()).to_string());
        for i in &r.intervals {
            lines.push(format!("  {} - {}", i.start, i.end));
        }
    }
    lines
}

fn no_lines(board: &Board<'_>) -> Vec<String> {
    let mut lines = vec![
        Colour::Red
            .bold()
            .paint(format!("NO :( ({})", board.no.len()))
            .to_string(),
    ];
    for r in &board.no {
        lines.push(Colour::Red.paint(r.name.as_str()).to_string());
    }
    lines
}

/// Render the yes group (with intervals) and the no group side by side.
pub fn render(day: NaiveDate, board: &Board<'_>) -> String {
    let left = yes_lines(board);
    let right = no_lines(board);

    let width = left
        .iter()
        .map(|l| visible_width(l))
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN)
        + GUTTER;

    let mut out = format!("📋 Responses for {}\n\n", day.format("%Y-%m-%d"));
    for idx in 0..left.len().max(right.len()) {
        let l = left.get(idx).map(String::as_str).unwrap_or("");
        let r = right.get(idx).map(String::as_str).unwrap_or("");
        let line = format!("{}{}", pad_right(l, width), r);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if board.is_empty() {
        out.push_str("\nNo answers yet.\n");
    }

    out
}

pub fn render_json(day: NaiveDate, board: &Board<'_>) -> String {
    let doc = json!({
        "day": day.format("%Y-%m-%d").to_string(),
        "yes": board.yes,
        "no": board.no,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
}
