use std::fmt;

/// A 0-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// 0-based line number
    pub line: usize,
    /// 0-based column (character offset within the line)
    pub column: usize,
    /// 0-based absolute byte offset from the start of input
    pub offset: usize,
}

/// A parse error with span information (begin..end).
#[derive(Debug, Clone, PartialEq)]
pub struct LitError {
    pub code: String,
    pub message: String,
    /// Start of the offending region
    pub begin: Position,
    /// End of the offending region (exclusive)
    pub end: Position,
}

impl LitError {
    pub fn syntax_error(message: String, begin: Position, end: Position) -> Self {
        LitError {
            code: "literal-syntax-error".to_string(),
            message,
            begin,
            end,
        }
    }
}

impl fmt::Display for LitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(
                f,
                "{}:{}: {} ({})",
                self.begin.line, self.begin.column, self.message, self.code
            )
        } else {
            write!(
                f,
                "{}:{}-{}:{}: {} ({})",
                self.begin.line,
                self.begin.column,
                self.end.line,
                self.end.column,
                self.message,
                self.code
            )
        }
    }
}

/// A rectangularity violation: two sibling subtrees reported different shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeError {
    /// Shape reported by the first child of the offending list.
    pub left: Vec<i64>,
    /// The first sibling shape that disagreed with it.
    pub right: Vec<i64>,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "non-rectangular array: sibling shapes {:?} and {:?} differ",
            self.left, self.right
        )
    }
}

/// Any failure produced by the entry points: malformed text or a
/// non-rectangular structure. Both are deterministic for a given input.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Parse(LitError),
    Shape(ShapeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => e.fmt(f),
            Error::Shape(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<LitError> for Error {
    fn from(e: LitError) -> Self {
        Error::Parse(e)
    }
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Shape(e)
    }
}
