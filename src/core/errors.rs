/*!
 * Error Types
 * Loader-boundary error handling with thiserror and miette
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for process loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while loading process records, before the engine runs.
///
/// Malformed input never reaches the engine; the loader rejects it here.
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("failed to read {path}")]
    #[diagnostic(
        code(memsim::load::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column '{0}' in header")]
    #[diagnostic(
        code(memsim::load::missing_column),
        help("The header row must name the columns pid, size, arrival and burst.")
    )]
    MissingColumn(&'static str),

    #[error("line {line}: invalid value '{value}' for field '{field}'")]
    #[diagnostic(
        code(memsim::load::invalid_field),
        help("pid, size, arrival and burst must all be unsigned integers.")
    )]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: field '{field}' must be positive")]
    #[diagnostic(
        code(memsim::load::non_positive),
        help("pid, size and burst must be greater than zero; only arrival may be zero.")
    )]
    NonPositive { line: usize, field: &'static str },

    #[error("duplicate pid {0}")]
    #[diagnostic(
        code(memsim::load::duplicate_pid),
        help("Every process record needs a unique pid.")
    )]
    DuplicatePid(Pid),

    #[error("line {line}: expected {expected} fields, found {found}")]
    #[diagnostic(
        code(memsim::load::short_row),
        help("Every data row must carry a value for each header column.")
    )]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}
