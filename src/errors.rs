use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinSketchError {
    /// Raised for internal errors in the library.  Should not happen.
    #[error("internal error: {message:?}")]
    Internal { message: String },

    #[error("must have same num: {n1} != {n2}")]
    MismatchNum { n1: u32, n2: u32 },

    #[error("different ksizes cannot be compared")]
    MismatchKSizes,

    #[error("mismatch in seed; comparison fail")]
    MismatchSeed,

    #[error("ksize must be a positive integer, got {ksize}")]
    InvalidKSize { ksize: u32 },

    #[error("sketch size must be a positive integer, got {num}")]
    InvalidSketchSize { num: u32 },

    #[error("invalid DNA character in input k-mer: {message}")]
    InvalidDNA { message: String },

    #[error("both sketches are empty, Jaccard distance is undefined")]
    EmptySketchComparison,

    #[error("sequence identifier {id:?} appears more than once")]
    DuplicateSequenceId { id: String },

    #[error(transparent)]
    ParseError(#[from] needletail::errors::ParseError),

    #[error(transparent)]
    CsvError(#[from] csv::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinSketchErrorCode {
    // no error
    NoError = 0,
    // internals
    Internal = 2,
    // Compatibility errors
    MismatchKSizes = 1_01,
    MismatchSeed = 1_04,
    MismatchNum = 1_07,
    // Configuration errors
    InvalidKSize = 2_01,
    InvalidSketchSize = 2_02,
    // Input sequence errors
    InvalidDNA = 11_01,
    EmptySketchComparison = 11_05,
    DuplicateSequenceId = 11_06,
    // external errors
    Io = 100_001,
    Utf8Error = 100_002,
    ParseError = 100_003,
    CsvError = 100_004,
}

impl MinSketchErrorCode {
    pub fn from_error(error: &MinSketchError) -> MinSketchErrorCode {
        match error {
            MinSketchError::Internal { .. } => MinSketchErrorCode::Internal,
            MinSketchError::MismatchNum { .. } => MinSketchErrorCode::MismatchNum,
            MinSketchError::MismatchKSizes => MinSketchErrorCode::MismatchKSizes,
            MinSketchError::MismatchSeed => MinSketchErrorCode::MismatchSeed,
            MinSketchError::InvalidKSize { .. } => MinSketchErrorCode::InvalidKSize,
            MinSketchError::InvalidSketchSize { .. } => MinSketchErrorCode::InvalidSketchSize,
            MinSketchError::InvalidDNA { .. } => MinSketchErrorCode::InvalidDNA,
            MinSketchError::EmptySketchComparison => MinSketchErrorCode::EmptySketchComparison,
            MinSketchError::DuplicateSequenceId { .. } => MinSketchErrorCode::DuplicateSequenceId,
            MinSketchError::ParseError { .. } => MinSketchErrorCode::ParseError,
            MinSketchError::CsvError { .. } => MinSketchErrorCode::CsvError,
            MinSketchError::Utf8Error { .. } => MinSketchErrorCode::Utf8Error,
            MinSketchError::IOError { .. } => MinSketchErrorCode::Io,
        }
    }

    /// Process exit status for this error.
    ///
    /// Always in `1..=255` so it can be handed to `std::process::exit`.
    pub fn exit_code(self) -> i32 {
        match self {
            MinSketchErrorCode::NoError => 0,
            MinSketchErrorCode::Internal => 2,
            MinSketchErrorCode::MismatchKSizes
            | MinSketchErrorCode::MismatchSeed
            | MinSketchErrorCode::MismatchNum => 3,
            MinSketchErrorCode::InvalidKSize | MinSketchErrorCode::InvalidSketchSize => 4,
            MinSketchErrorCode::InvalidDNA
            | MinSketchErrorCode::EmptySketchComparison
            | MinSketchErrorCode::DuplicateSequenceId => 5,
            MinSketchErrorCode::Io
            | MinSketchErrorCode::Utf8Error
            | MinSketchErrorCode::ParseError
            | MinSketchErrorCode::CsvError => 6,
        }
    }
}
