use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContractError>;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Unknown contract '{0}'")]
    UnknownContract(String),

    #[error("Field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Invalid timeframe '{0}'")]
    InvalidTimeframe(String),

    #[error("Invalid timerange '{0}'")]
    InvalidTimerange(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD HH:MM:SS+00:00")]
    InvalidDate(String),

    #[error("Limit must be positive")]
    NonPositiveLimit,

    #[error("Confidence {value} is outside of [{min:?}, {max:?}]")]
    ConfidenceOutOfBounds {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("Length is {length}, but {field} has {actual} entries")]
    LengthMismatch {
        field: &'static str,
        length: usize,
        actual: usize,
    },

    #[error("Row {row} has {width} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("Column '{0}' is missing from all_columns")]
    ColumnNotInAllColumns(String),

    #[error("Pair '{0}' is listed more than once")]
    DuplicatePair(String),

    #[error("Pair interval references unlisted pair '{0}'")]
    UnlistedPair(String),

    #[error("{field} is {actual}, but data says {expected}")]
    TimestampMismatch {
        field: &'static str,
        expected: i64,
        actual: i64,
    },

    #[error("Timeframe {timeframe} lasts {expected} ms, but timeframe_ms is {actual}")]
    TimeframeMismatch {
        timeframe: String,
        expected: i64,
        actual: i64,
    },

    #[error("Response carries neither legacy nor directional signal counts")]
    MissingSignalCounts,

    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    UrlEncoding(#[from] serde_urlencoded::ser::Error),
}
