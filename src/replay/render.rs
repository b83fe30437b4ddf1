//! ASCII renderer for terminal viewing.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::game::Grid;

/// Render the board with a score header.
///
/// Output format:
/// ```text
/// Score: 1284                        Max: 128
/// ┌──────┬──────┬──────┬──────┐
/// │    2 │      │      │    4 │
/// ├──────┼──────┼──────┼──────┤
/// │      │   16 │      │      │
/// ...
/// └──────┴──────┴──────┴──────┘
/// ```
#[must_use]
pub fn render_ascii(grid: &Grid, score: u64) -> String {
    let mut output = String::new();
    let width = cell_width(grid);
    let size = usize::from(grid.size());

    output.push_str(&format!("Score: {score:<10} Max: {}\n", grid.max_value()));

    push_border(&mut output, size, width, '┌', '┬', '┐');
    for (i, row) in grid.rows().iter().enumerate() {
        if i > 0 {
            push_border(&mut output, size, width, '├', '┼', '┤');
        }
        output.push('│');
        for &value in row {
            if value == 0 {
                output.push_str(&" ".repeat(width));
            } else {
                output.push_str(&format!("{value:>w$} ", w = width - 1));
            }
            output.push('│');
        }
        output.push('\n');
    }
    push_border(&mut output, size, width, '└', '┴', '┘');

    output
}

/// Width of one cell, wide enough for the largest value plus padding.
fn cell_width(grid: &Grid) -> usize {
    grid.max_value().to_string().len().max(4) + 2
}

fn push_border(output: &mut String, size: usize, width: usize, left: char, mid: char, right: char) {
    output.push(left);
    for i in 0..size {
        if i > 0 {
            output.push(mid);
        }
        output.push_str(&"─".repeat(width));
    }
    output.push(right);
    output.push('\n');
}
