use crate::core::document::{count_blanks, find_problem_regions};
use crate::domain::model::{MarkerConfig, Notebook};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of one answer-cell check.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemCheck {
    pub problem: String,
    pub part: usize,
    pub cell_index: usize,
    pub blanks_found: usize,
    pub target: usize,
    pub passed: bool,
}

/// Accumulated verification result for one generated notebook. Mismatches
/// are collected, never raised: the verifier always runs to completion and
/// reports everything it found.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub level: String,
    pub checks: Vec<ProblemCheck>,
    pub mismatches: Vec<String>,
    pub verified_at: DateTime<Utc>,
}

impl VerifyReport {
    fn new(level: &str) -> Self {
        Self {
            level: level.to_string(),
            checks: Vec::new(),
            mismatches: Vec::new(),
            verified_at: Utc::now(),
        }
    }

    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.checks.iter().all(|c| c.passed)
    }
}

pub struct Verifier<'a> {
    markers: &'a MarkerConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(markers: &'a MarkerConfig) -> Self {
        Self { markers }
    }

    /// Checks one generated notebook against its source. The problem→answer
    /// map is re-derived from both documents independently; stored metadata
    /// is never trusted. Every answer cell must hold between 1 and `target`
    /// blanks (exactly 0 when the target is 0), and every cell outside an
    /// answer region must be content-identical to the original — markdown
    /// leniently on whitespace-only differences, code byte for byte.
    pub fn verify(&self, original: &Notebook, generated: &Notebook, target: usize) -> VerifyReport {
        self.verify_level("", original, generated, target)
    }

    pub fn verify_level(
        &self,
        level: &str,
        original: &Notebook,
        generated: &Notebook,
        target: usize,
    ) -> VerifyReport {
        let mut report = VerifyReport::new(level);

        if original.cells.len() != generated.cells.len() {
            report.mismatches.push(format!(
                "cell count mismatch: original {}, generated {}",
                original.cells.len(),
                generated.cells.len()
            ));
        }

        let original_regions = find_problem_regions(&original.cells, self.markers);
        let generated_regions = find_problem_regions(&generated.cells, self.markers);

        let mut answer_cells: HashSet<usize> = HashSet::new();

        for region in &original_regions {
            let Some(counterpart) = generated_regions
                .iter()
                .find(|r| r.number == region.number)
            else {
                report.mismatches.push(format!(
                    "problem {} not found in generated notebook",
                    region.number
                ));
                continue;
            };

            if counterpart.answer_indices.len() != region.answer_indices.len() {
                report.mismatches.push(format!(
                    "problem {}: expected {} answer cells, generated has {}",
                    region.number,
                    region.answer_indices.len(),
                    counterpart.answer_indices.len()
                ));
            }

            answer_cells.extend(region.answer_indices.iter().copied());

            for (part, &cell_index) in counterpart.answer_indices.iter().enumerate() {
                let blanks_found = count_blanks(&generated.cells[cell_index]);
                let passed = if target == 0 {
                    blanks_found == 0
                } else {
                    (1..=target).contains(&blanks_found)
                };

                report.checks.push(ProblemCheck {
                    problem: region.number.clone(),
                    part: part + 1,
                    cell_index,
                    blanks_found,
                    target,
                    passed,
                });
            }
        }

        // Everything outside the answer regions must come through untouched.
        for (index, (before, after)) in original
            .cells
            .iter()
            .zip(generated.cells.iter())
            .enumerate()
        {
            if answer_cells.contains(&index) {
                continue;
            }
            let identical = if before.is_markdown() {
                normalize_markdown(&before.text()) == normalize_markdown(&after.text())
            } else {
                before.text() == after.text()
            };
            if !identical {
                report
                    .mismatches
                    .push(format!("cell {} was modified outside an answer region", index));
            }
        }

        report
    }
}

/// Markdown comparison ignores incidental whitespace-only differences.
fn normalize_markdown(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
