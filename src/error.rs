// error.rs
//
// Copyright (c) 2019-2023  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while rasterizing or encoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// Color name not in the [Palette](struct.Palette.html).
    InvalidColor(String),
    /// Writer used after the trailer was written.
    WriterClosed,
    /// Curve sample evaluated to a division by zero.
    DivisionByZero,
    /// Curve sample failed for any other reason.
    Evaluation(String),
    /// Canvas width or height is zero.
    InvalidDimensions,
}

/// Sketchgif result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::InvalidColor(name) => write!(fmt, "invalid color: {}", name),
            Error::Evaluation(msg) => write!(fmt, "evaluation failed: {}", msg),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let e = Error::InvalidColor("mauve".to_string());
        assert_eq!(e.to_string(), "invalid color: mauve");
        assert_eq!(Error::WriterClosed.to_string(), "WriterClosed");
    }

    #[test]
    fn io_source() {
        use std::error::Error as _;
        let e = Error::from(io::Error::new(io::ErrorKind::Other, "sink"));
        assert!(e.source().is_some());
        assert!(Error::DivisionByZero.source().is_none());
    }
}
