use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerbDrillError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Dataset error: {0}")]
    Load(#[from] LoadError),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("VerbDrillError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for VerbDrillError {
    fn from(error: std::io::Error) -> Self {
        VerbDrillError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for VerbDrillError {
    fn from(error: reqwest::Error) -> Self {
        VerbDrillError::Reqwest(Box::new(error))
    }
}

/// Reasons the verb sheet could not be turned into a dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not parse sheet: {0}")]
    Parse(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("sheet has no rows")]
    Empty,
}

impl From<reqwest::Error> for LoadError {
    fn from(error: reqwest::Error) -> Self {
        LoadError::Transport(error.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(error: csv::Error) -> Self {
        LoadError::Parse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_only_absent_names() {
        let err = LoadError::MissingColumns(vec!["CEFR".to_string(), "Past simple".to_string()]);
        assert_eq!(err.to_string(), "Missing required columns: CEFR, Past simple");
    }

    #[test]
    fn load_error_wraps_into_crate_error() {
        let err: VerbDrillError = LoadError::Empty.into();
        assert!(matches!(err, VerbDrillError::Load(LoadError::Empty)));
        assert_eq!(err.to_string(), "Dataset error: sheet has no rows");
    }
}
