use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Extraction outcome for a lookup. NotFound covers everything upstream of
/// parsing (bad name, removed page, network failure, all treated alike);
/// UnexpectedLayout means the page was fetched but its structure no longer
/// matches the extraction heuristics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to find data for the {kind} '{name}'. Please ensure that the {kind} is spelled correctly.")]
    NotFound { kind: &'static str, name: String },

    #[error("Unexpected page layout: {0}. The site's markup may have changed.")]
    UnexpectedLayout(String),
}

impl Error {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Error::UnexpectedLayout(msg.into())
    }
}
