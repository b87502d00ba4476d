use crate::core::classifier::PRIORITY_NONE;
use crate::domain::model::{Occurrence, Selection};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Chooses exactly min(count, eligible) occurrences to blank.
///
/// Eligibility: classified above the unclassified tier and not inside a
/// string literal. Ordering is priority descending with first-seen source
/// order as the tie-break; `sort_by_key` is stable, so equal-priority
/// occurrences keep their scan order. The tie-break is deterministic on
/// purpose — repeated runs over the same block must produce byte-identical
/// output, so no randomness is involved. No two selections ever address the
/// same (keyword, occurrence-index) pair.
pub fn select_blanks(occurrences: &[Occurrence], count: usize) -> Vec<Selection> {
    if count == 0 || occurrences.is_empty() {
        return Vec::new();
    }

    let mut eligible: Vec<&Occurrence> = occurrences
        .iter()
        .filter(|o| o.priority > PRIORITY_NONE && !o.in_string)
        .collect();
    eligible.sort_by_key(|o| Reverse(o.priority));

    let mut chosen: HashSet<(&str, usize)> = HashSet::new();
    let mut selections = Vec::new();

    for occurrence in eligible {
        if selections.len() >= count {
            break;
        }
        if chosen.insert((occurrence.text.as_str(), occurrence.occurrence_index)) {
            selections.push(Selection {
                keyword: occurrence.text.clone(),
                occurrence_index: occurrence.occurrence_index,
            });
        }
    }
    selections
}
