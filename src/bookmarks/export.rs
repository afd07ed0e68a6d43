use std::{
    fs,
    path::Path,
};

use chrono::{
    DateTime,
    Local,
};

use crate::core::{
    Verb,
    VerbDrillError,
};

pub const LISTING_HEADING: &str = "Your saved verbs:";
pub const NO_SAVED_VERBS: &str = "You have no saved verbs yet.";

/// Numbered `n. base – past – participle` lines.
pub fn listing_lines(verbs: &[Verb]) -> Vec<String> {
    verbs.iter().enumerate().map(|(i, verb)| format!("{}. {}", i + 1, verb.summary())).collect()
}

/// A standalone page with the saved verbs, for printing or keeping open in a browser.
pub fn render_html(verbs: &[Verb], generated_at: DateTime<Local>) -> String {
    let items: String = verbs
        .iter()
        .map(|verb| format!("      <li>{}</li>\n", html_escape::encode_text(&verb.summary())))
        .collect();

    let body = if verbs.is_empty() {
        "    <p>No saved verbs found.</p>\n".to_string()
    } else {
        format!("    <ul>\n{items}    </ul>\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>My Learning List</title>
    <style>
      body {{ font-family: sans-serif; padding: 20px; }}
      h2 {{ color: #66023c; }}
      li {{ margin-bottom: 5px; font-size: 1rem; }}
      footer {{ color: #888; font-size: 0.8rem; margin-top: 20px; }}
    </style>
  </head>
  <body>
    <h2>Your Saved Verbs</h2>
{body}    <footer>Exported {}</footer>
  </body>
</html>
"#,
        generated_at.format("%Y-%m-%d %H:%M")
    )
}

pub fn write_page(path: &Path, verbs: &[Verb]) -> Result<(), VerbDrillError> {
    fs::write(path, render_html(verbs, Local::now()))?;
    log::info!("Wrote {} saved verbs to {}", verbs.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> Vec<Verb> {
        vec![Verb::new("go", "went", "gone", &["A1"]), Verb::new("hit", "hit", "hit", &["A2"])]
    }

    #[test]
    fn test_listing_lines() {
        assert_eq!(listing_lines(&sample()), vec!["1. go – went – gone", "2. hit – hit – hit"]);
        assert!(listing_lines(&[]).is_empty());
    }

    #[test]
    fn test_html_page_escapes_text() {
        let when = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let mut verbs = sample();
        verbs[0].base = "<go>".to_string();

        let page = render_html(&verbs, when);
        assert!(page.contains("<title>My Learning List</title>"));
        assert!(page.contains("<li>&lt;go&gt; – went – gone</li>"));
        assert!(page.contains("<li>hit – hit – hit</li>"));
        assert!(page.contains("Exported 2024-05-01 09:30"));

        assert!(render_html(&[], when).contains("No saved verbs found."));
    }
}
