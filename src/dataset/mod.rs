//! Loading the irregular verb sheet.
//!
//! The sheet is fetched as CSV, validated for the required columns and turned into
//! normalized [`Verb`] records. Any failure falls back to a tiny built-in corpus so the
//! drill always has something to ask.

pub mod cefr;
mod fallback;

use std::collections::HashMap;

use reqwest::Client;

pub use cefr::{
    compare_levels,
    parse_cefr_cell,
    sort_levels,
};
pub use fallback::fallback_verbs;

use crate::core::{
    http::fetch_text,
    normalize_form,
    LoadError,
    Verb,
};

pub const COL_INFINITIVE: &str = "Infinitive";
pub const COL_PAST: &str = "Past simple";
pub const COL_PARTICIPLE: &str = "Past participle";
pub const COL_CEFR: &str = "CEFR";
pub const COL_CATEGORIES: &str = "Categories";

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_INFINITIVE, COL_PAST, COL_PARTICIPLE, COL_CEFR];

pub const DEFAULT_DATASET_URL: &str = "https://docs.google.com/spreadsheets/d/1evNm8Cyj-P2_ful3lt5mT5Bu0aLZWaCYIKNmFtO_PSw/gviz/tq?tqx=out:csv&gid=0";

pub const FALLBACK_WARNING: &str = "Could not load the database";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub verbs: Vec<Verb>,
    /// Every distinct level token seen in `verbs`, in display order.
    pub levels: Vec<String>,
}

impl Dataset {
    pub fn from_verbs(verbs: Vec<Verb>) -> Self {
        let levels = sort_levels(verbs.iter().flat_map(|v| v.cefr_tokens.iter().cloned()));
        Self { verbs, levels }
    }

    pub fn fallback() -> Self {
        Self::from_verbs(fallback_verbs())
    }
}

/// Outcome of a load attempt. `warning` is set when the fallback corpus was substituted.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub warning: Option<String>,
}

/// Parse CSV text with a header row into a dataset.
pub fn parse_dataset(text: &str) -> Result<Dataset, LoadError> {
    let mut reader =
        csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::Headers).from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty);
    }

    let columns: HashMap<&str, usize> =
        headers.iter().enumerate().map(|(idx, name)| (name, idx)).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !columns.contains_key(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let cell = |record: &csv::StringRecord, name: &str| -> String {
        columns.get(name).and_then(|&idx| record.get(idx)).unwrap_or_default().to_string()
    };

    let mut verbs = Vec::new();
    let mut row_count = 0usize;
    for record in reader.records() {
        let record = record?;
        row_count += 1;

        let categories = cell(&record, COL_CATEGORIES);
        let verb = Verb {
            base: normalize_form(&cell(&record, COL_INFINITIVE)),
            past: normalize_form(&cell(&record, COL_PAST)),
            participle: normalize_form(&cell(&record, COL_PARTICIPLE)),
            cefr_tokens: parse_cefr_cell(&cell(&record, COL_CEFR)),
            categories: Some(categories.trim().to_string()).filter(|c| !c.is_empty()),
        };

        if verb.is_complete() {
            verbs.push(verb);
        }
    }

    if row_count == 0 {
        return Err(LoadError::Empty);
    }

    log::debug!("Parsed {} verbs from {} rows", verbs.len(), row_count);
    Ok(Dataset::from_verbs(verbs))
}

pub async fn load(client: &Client, url: &str) -> Result<Dataset, LoadError> {
    let text = fetch_text(client, url).await?;
    parse_dataset(&text)
}

/// Like [`load`], but never fails: on error the built-in corpus is returned with a warning.
pub async fn load_or_fallback(client: &Client, url: &str) -> LoadReport {
    match load(client, url).await {
        Ok(dataset) => {
            log::info!("Loaded {} verbs across {} levels", dataset.verbs.len(), dataset.levels.len());
            LoadReport { dataset, warning: None }
        }
        Err(e) => {
            log::warn!("Falling back to built-in verbs: {e}");
            LoadReport { dataset: Dataset::fallback(), warning: Some(FALLBACK_WARNING.to_string()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\"Infinitive\",\"Past simple\",\"Past participle\",\"CEFR\",\"Categories\"\n\
\" Go \",\"WENT\",\"gone\",\"A1\",\"motion\"\n\
\"write\",\"wrote\",\"written\",\"B1, B2\",\"\"\n\
\"\",\"was\",\"been\",\"A1\",\"\"\n\
\"dream\",\"dreamt\",\"   \",\"B2\",\"\"\n\
\"wake\",\"woke\",\"woken\",\"\",\"\"\n";

    fn find<'a>(dataset: &'a Dataset, base: &str) -> &'a Verb {
        dataset.verbs.iter().find(|v| v.base == base).unwrap()
    }

    #[test]
    fn test_rows_are_normalized_and_filtered() {
        let dataset = parse_dataset(SHEET).unwrap();
        let bases: Vec<&str> = dataset.verbs.iter().map(|v| v.base.as_str()).collect();
        assert_eq!(bases, vec!["go", "write", "wake"]);

        for verb in &dataset.verbs {
            for form in [&verb.base, &verb.past, &verb.participle] {
                assert!(!form.is_empty());
                assert_eq!(form, &form.trim().to_lowercase());
            }
        }

        let go = find(&dataset, "go");
        assert_eq!(go.past, "went");
        assert_eq!(go.categories.as_deref(), Some("motion"));
        assert_eq!(find(&dataset, "write").cefr_tokens, vec!["B1", "B2"]);
        assert!(find(&dataset, "wake").cefr_tokens.is_empty());
    }

    #[test]
    fn test_levels_collected_in_order() {
        let dataset = parse_dataset(SHEET).unwrap();
        assert_eq!(dataset.levels, vec!["A1", "B1", "B2"]);
    }

    #[test]
    fn test_missing_columns_are_named() {
        let text = "Infinitive,Past participle\ngo,gone\n";
        match parse_dataset(text) {
            Err(LoadError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Past simple".to_string(), "CEFR".to_string()]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheets_are_rejected() {
        assert!(matches!(parse_dataset(""), Err(LoadError::Empty)));
        let header_only = "Infinitive,Past simple,Past participle,CEFR\n";
        assert!(matches!(parse_dataset(header_only), Err(LoadError::Empty)));
    }

    #[test]
    fn test_fallback_corpus_levels() {
        let dataset = Dataset::fallback();
        assert_eq!(dataset.verbs.len(), 3);
        assert_eq!(dataset.levels, vec!["A2", "B1"]);
    }

    #[tokio::test]
    async fn test_unreachable_source_uses_fallback() {
        let client = Client::new();
        let report = load_or_fallback(&client, "http://127.0.0.1:9/verbs.csv").await;
        assert_eq!(report.warning.as_deref(), Some(FALLBACK_WARNING));
        assert_eq!(report.dataset, Dataset::fallback());
    }
}
