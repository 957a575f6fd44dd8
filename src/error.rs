use std::fmt;

/// Errors surfaced while building or writing a document.
#[derive(Debug)]
pub enum Error {
    /// A block was handed an invalid static configuration.
    Config(String),
    /// The drawing backend reported an internal fault.
    Backend(String),
    /// The output destination (or an image source file) could not be read or written.
    Io(std::io::Error),
    /// A failure raised while rendering a block, tagged with the block kind.
    Render {
        block: &'static str,
        source: Box<Error>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Error::Backend(msg) => write!(f, "backend error: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Render { block, source } => write!(f, "{block} render: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Render { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
