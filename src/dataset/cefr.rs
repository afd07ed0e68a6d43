use std::{
    cmp::Ordering,
    collections::HashSet,
    sync::LazyLock,
};

use regex::Regex;

/// Known CEFR levels from easiest to hardest.
pub const KNOWN_LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;/|&\s]+").expect("separator pattern is valid"));

/// Split a free-text CEFR cell ("B1, B2", "B1/B2", "b1 & b2") into unique uppercase tokens,
/// keeping first-seen order.
pub fn parse_cefr_cell(cell: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SEPARATORS
        .split(cell.trim())
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_uppercase)
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

fn level_rank(level: &str) -> usize {
    KNOWN_LEVELS.iter().position(|known| *known == level).unwrap_or(KNOWN_LEVELS.len())
}

/// A1 < A2 < ... < C2, then unknown codes alphabetically.
pub fn compare_levels(a: &str, b: &str) -> Ordering {
    level_rank(a).cmp(&level_rank(b)).then_with(|| a.cmp(b))
}

pub fn sort_levels<I>(levels: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let unique: HashSet<String> = levels.into_iter().collect();
    let mut sorted: Vec<String> = unique.into_iter().collect();
    sorted.sort_by(|a, b| compare_levels(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_variants() {
        let expected = vec!["B1".to_string(), "B2".to_string()];
        assert_eq!(parse_cefr_cell("B1, B2"), expected);
        assert_eq!(parse_cefr_cell("B1/B2"), expected);
        assert_eq!(parse_cefr_cell("B1 & B2"), expected);
        assert_eq!(parse_cefr_cell("B1 B2"), expected);
        assert_eq!(parse_cefr_cell("b1;|b2"), expected);
    }

    #[test]
    fn test_empty_and_duplicate_cells() {
        assert!(parse_cefr_cell("").is_empty());
        assert!(parse_cefr_cell("  , / ").is_empty());
        assert_eq!(parse_cefr_cell("a2, A2 a2"), vec!["A2".to_string()]);
    }

    #[test]
    fn test_level_ordering() {
        let sorted = sort_levels(
            ["C2", "ZZ", "A1", "B2", "XA", "A2", "A1"].into_iter().map(String::from),
        );
        assert_eq!(sorted, vec!["A1", "A2", "B2", "C2", "XA", "ZZ"]);
        assert_eq!(compare_levels("B1", "A2"), Ordering::Greater);
    }
}
