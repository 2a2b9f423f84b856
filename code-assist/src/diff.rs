//! Line-level diff between an original and a transformed document.
//!
//! The engine classifies every transformed line as unchanged or
//! added/modified and reports the 1-based numbers of the latter, in
//! increasing order. Removed original lines have no transformed-side number
//! and are never reported.
//!
//! Alignment is a line-oriented LCS edit script. Common prefix and suffix
//! are trimmed first so the quadratic table only covers the middle region;
//! if that region still exceeds [`MAX_TABLE_CELLS`], the engine degrades by
//! flagging the whole middle region (a deterministic superset, still within
//! the transformed document's bounds).

/// Upper bound on LCS table cells before the engine degrades.
///
/// At the 10,000-line document limit a pathological pair would need 10^8
/// cells; this budget caps the table at ~16 MiB of `u32`.
const MAX_TABLE_CELLS: usize = 4_000_000;

/// Splits a code string into its line sequence.
///
/// The empty string is the empty sequence; otherwise every `\n` terminates
/// a line, so `"a\n"` has two lines (the second empty).
pub fn split_lines(code: &str) -> Vec<&str> {
    if code.is_empty() {
        Vec::new()
    } else {
        code.split('\n').collect()
    }
}

/// Returns the 1-based transformed-side numbers of added or modified lines.
///
/// Identical documents yield an empty result; an empty original flags every
/// transformed line; an empty transformed document yields an empty result.
/// Every reported number is in `1..=transformed.len()` and the sequence is
/// strictly increasing. Identical inputs always produce identical output.
pub fn diff_added_or_modified(original: &[&str], transformed: &[&str]) -> Vec<usize> {
    diff_with_budget(original, transformed, MAX_TABLE_CELLS)
}

fn diff_with_budget(original: &[&str], transformed: &[&str], budget: usize) -> Vec<usize> {
    let prefix = original
        .iter()
        .zip(transformed.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let max_suffix = original.len().min(transformed.len()) - prefix;
    let suffix = (0..max_suffix)
        .take_while(|&k| original[original.len() - 1 - k] == transformed[transformed.len() - 1 - k])
        .count();

    let mid_original = &original[prefix..original.len() - suffix];
    let mid_transformed = &transformed[prefix..transformed.len() - suffix];

    if mid_transformed.is_empty() {
        return Vec::new();
    }
    // No original lines to align against, or the table would blow the
    // budget: every middle transformed line counts as added/modified.
    if mid_original.is_empty() || mid_original.len() * mid_transformed.len() > budget {
        return (prefix + 1..=prefix + mid_transformed.len()).collect();
    }

    let flagged_mid = lcs_inserted_lines(mid_original, mid_transformed);
    flagged_mid.into_iter().map(|j| prefix + j).collect()
}

/// LCS edit script over the middle region; returns 1-based transformed-side
/// numbers (relative to the region) of inserted lines.
fn lcs_inserted_lines(a: &[&str], b: &[&str]) -> Vec<usize> {
    let cols = b.len() + 1;
    let mut table = vec![0u32; (a.len() + 1) * cols];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i * cols + j] = if a[i - 1] == b[j - 1] {
                table[(i - 1) * cols + j - 1] + 1
            } else {
                table[(i - 1) * cols + j].max(table[i * cols + j - 1])
            };
        }
    }

    // Backtrack from the end. On equal scores the transformed-side step is
    // taken, which keeps the choice deterministic for identical inputs.
    let mut flagged = Vec::new();
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            i -= 1;
            j -= 1;
        } else if table[i * cols + j - 1] >= table[(i - 1) * cols + j] {
            flagged.push(j);
            j -= 1;
        } else {
            i -= 1;
        }
    }
    while j > 0 {
        flagged.push(j);
        j -= 1;
    }

    flagged.reverse();
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(code: &str) -> Vec<&str> {
        split_lines(code)
    }

    #[test]
    fn empty_string_is_the_empty_sequence() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a"), vec!["a"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn identical_documents_flag_nothing() {
        let doc = lines("fn main() {\n    println!(\"hi\");\n}");
        assert!(diff_added_or_modified(&doc, &doc).is_empty());
    }

    #[test]
    fn empty_original_flags_every_line() {
        let out = lines("a\nb\nc");
        assert_eq!(diff_added_or_modified(&[], &out), vec![1, 2, 3]);
    }

    #[test]
    fn empty_transformed_flags_nothing() {
        let orig = lines("a\nb");
        assert!(diff_added_or_modified(&orig, &[]).is_empty());
    }

    #[test]
    fn modified_line_is_flagged_at_its_new_position() {
        let orig = lines("print(1)\nprint(2)");
        let new = lines("print(1)\nprint(3)");
        assert_eq!(diff_added_or_modified(&orig, &new), vec![2]);
    }

    #[test]
    fn insertion_shifts_nothing_else() {
        let orig = lines("a\nc");
        let new = lines("a\nb\nc");
        assert_eq!(diff_added_or_modified(&orig, &new), vec![2]);
    }

    #[test]
    fn deletion_emits_no_transformed_number() {
        let orig = lines("a\nb\nc");
        let new = lines("a\nc");
        assert!(diff_added_or_modified(&orig, &new).is_empty());
    }

    #[test]
    fn combined_edits_stay_in_bounds_and_ordered() {
        let orig = lines("keep\nold1\nold2\nkeep2\ntail");
        let new = lines("keep\nnew1\nkeep2\nnew2\ntail");
        let flags = diff_added_or_modified(&orig, &new);
        assert!(flags.windows(2).all(|w| w[0] < w[1]));
        assert!(flags.iter().all(|&n| n >= 1 && n <= new.len()));
        assert_eq!(flags, vec![2, 4]);
    }

    #[test]
    fn duplicate_line_content_is_positioned_correctly() {
        let orig = lines("x\nx");
        let new = lines("x\nx\nx");
        assert_eq!(diff_added_or_modified(&orig, &new), vec![3]);
    }

    #[test]
    fn over_budget_degrades_to_flagging_the_middle() {
        let orig = lines("same\na\nb\nc\nsame");
        let new = lines("same\nd\ne\nsame");
        // Budget of 1 cell forces the degraded path; prefix/suffix stay
        // unflagged, the whole middle is reported.
        assert_eq!(diff_with_budget(&orig, &new, 1), vec![2, 3]);
        // The exact path agrees here since nothing in the middle matches.
        assert_eq!(diff_added_or_modified(&orig, &new), vec![2, 3]);
    }

    #[test]
    fn same_inputs_always_give_the_same_result() {
        let orig = lines("a\nb\na\nb");
        let new = lines("b\na\nb\na");
        let first = diff_added_or_modified(&orig, &new);
        for _ in 0..5 {
            assert_eq!(diff_added_or_modified(&orig, &new), first);
        }
    }
}
