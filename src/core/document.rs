use crate::domain::model::{Cell, MarkerConfig, ProblemRegion, BLANK_MARKER};
use regex::Regex;

/// Regex matching a marker prefix followed by the 3-digit problem number,
/// anchored to the start of the line.
fn marker_regex(prefix: &str) -> Regex {
    Regex::new(&format!(r"^{}\s*(\d{{3}})", regex::escape(prefix)))
        .expect("escaped marker prefix is a valid pattern")
}

/// Problem number carried by a markdown cell's first line, if any.
pub fn problem_number(cell: &Cell, markers: &MarkerConfig) -> Option<String> {
    if !cell.is_markdown() {
        return None;
    }
    let first = cell.first_line()?;
    let re = marker_regex(&markers.problem_prefix);
    re.captures(first.trim_start())
        .map(|caps| caps[1].to_string())
}

/// Problem number referenced by a code cell's answer header, if any.
pub fn answer_number(cell: &Cell, markers: &MarkerConfig) -> Option<String> {
    if !cell.is_code() {
        return None;
    }
    let first = cell.first_line()?;
    let re = marker_regex(&markers.answer_prefix);
    re.captures(first).map(|caps| caps[1].to_string())
}

/// Scans the cell list and derives every problem region with its owned
/// answer cells. Ownership is positional: answer cells are collected from
/// the cell after the problem markdown until a markdown cell carrying a
/// *different* problem number appears. A problem may own zero, one or many
/// answer cells (sub-parts such as construction and execution). The result
/// is derived fresh on every call and never persisted.
pub fn find_problem_regions(cells: &[Cell], markers: &MarkerConfig) -> Vec<ProblemRegion> {
    let mut regions = Vec::new();

    for (index, cell) in cells.iter().enumerate() {
        let Some(number) = problem_number(cell, markers) else {
            continue;
        };

        let mut answer_indices = Vec::new();
        for (offset, candidate) in cells[index + 1..].iter().enumerate() {
            if let Some(other) = problem_number(candidate, markers) {
                if other != number {
                    break;
                }
            }
            if answer_number(candidate, markers).as_deref() == Some(number.as_str()) {
                answer_indices.push(index + 1 + offset);
            }
        }

        regions.push(ProblemRegion {
            number,
            problem_index: index,
            answer_indices,
        });
    }
    regions
}

/// Number of blank markers in a cell's concatenated text.
pub fn count_blanks(cell: &Cell) -> usize {
    cell.text().matches(BLANK_MARKER).count()
}

/// Re-splits masked text into the notebook line convention: every line keeps
/// its trailing newline, the last line only if the text ends with one.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
