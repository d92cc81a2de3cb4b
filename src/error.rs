use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// `start` was greater than `end`; nothing was generated.
    InvalidRange { start: u64, end: u64 },
    /// The range holds more labels than one run may generate.
    RangeTooLarge { count: u128, max: usize },
    /// The barcode renderer could not produce an image for one identifier.
    Render { identifier: String, reason: String },
    /// The drawing surface failed to place an image or finalize the document.
    Draw(String),
    /// The layout constants leave no room for a single label.
    Layout(String),
    Io(std::io::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than by generation.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidRange { .. } | Error::RangeTooLarge { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { start, end } => write!(
                f,
                "invalid range: end number ({end}) must be greater than or equal to start number ({start})"
            ),
            Error::RangeTooLarge { count, max } => write!(
                f,
                "range too large: {count} labels requested, at most {max} per sheet"
            ),
            Error::Render { identifier, reason } => {
                write!(f, "failed to render barcode for {identifier:?}: {reason}")
            }
            Error::Draw(msg) => write!(f, "failed to draw sheet: {msg}"),
            Error::Layout(msg) => write!(f, "invalid sheet layout: {msg}"),
            Error::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
