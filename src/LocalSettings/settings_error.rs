use thiserror::Error;

/// error types for settings validation and the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(
        "N_variable = {n_variable} does not equal n_dim - len(exclude) (n_dim = {n_dim}, excluded = {excluded})"
    )]
    InconsistentVariableCount {
        n_variable: usize,
        n_dim: usize,
        excluded: usize,
    },
    #[error("{what} index {index} is out of range for n_dim = {n_dim}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        n_dim: usize,
    },
    #[error("excluded dimension {0} is listed more than once")]
    DuplicateExcludedDimension(usize),
    #[error("species index {index} exceeds the limit of {limit}")]
    SpeciesIndexOutOfRange { index: usize, limit: usize },
    #[error("Invalid nominal concentration {value} for species {species}")]
    InvalidConcentration { species: usize, value: f64 },
    #[error("Chattering pair \"{key}\" joins species {species} with itself")]
    DegenerateChatteringPair { key: String, species: usize },
    #[error("Invalid temperature order: {0}")]
    InvalidTemperatureOrder(String),
    #[error("Invalid time marker: {0}")]
    InvalidTime(String),
    #[error("Invalid regular expression in '{field}': {source}")]
    InvalidRegex {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("Atom followed must not be empty")]
    EmptyAtomTag,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
