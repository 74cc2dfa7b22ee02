use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Errors raised while parsing an XPM pixmap
///
/// All of these are fatal to the parse: no partial header, color table or body is returned.
pub enum ParseError {
    /// The text does not contain a `{ ... }` region
    #[error("no bracketed '{{ ... }}' region found")]
    MalformedContainer,
    /// An entry of the bracketed region is not a well-formed quoted string,
    /// or a color row cannot be understood
    #[error("malformed entry {index}: {reason}")]
    MalformedEntry {
        /// zero-based entry index inside the bracketed region
        index: usize,
        /// what went wrong
        reason: String,
    },
    /// The values line does not hold 4 or 6 unsigned integers
    #[error("bad header: {0}")]
    BadHeader(String),
    /// The header announces more colors than there are entries
    #[error("header announces {expected} colors but only {found} color rows are present")]
    MissingColors {
        /// colors announced by the header
        expected: usize,
        /// color rows actually present
        found: usize,
    },
    /// More color entries than the header announces were handed to [`crate::Pixmap::new`]
    #[error("header announces {expected} colors but {found} color entries were given")]
    TooManyColors {
        /// colors announced by the header
        expected: usize,
        /// distinct color entries given
        found: usize,
    },
    /// A symbol appears twice in the color table
    #[error("duplicate symbol {0:?} in color table")]
    DuplicateSymbol(String),
    /// The number of pixel rows differs from the header height
    #[error("expected {expected} pixel rows, found {found}")]
    RowCountMismatch {
        /// header height
        expected: usize,
        /// pixel rows present
        found: usize,
    },
    /// A pixel row is not `width * char_per_pixel` characters long
    #[error("pixel row {row} is {found} characters long, expected {expected}")]
    RowWidthMismatch {
        /// zero-based row index
        row: usize,
        /// `width * char_per_pixel`
        expected: usize,
        /// actual length in characters
        found: usize,
    },
    /// A pixel row references a symbol missing from the color table
    #[error("unknown symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        /// zero-based row index
        row: usize,
        /// zero-based pixel column
        column: usize,
        /// the offending symbol
        symbol: String,
    },
}
