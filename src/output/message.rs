use crate::FetchError;
use std::fmt;

/// A status report for one processed URL
///
/// Successful fetches report an empty message with no error. Failures carry a
/// description of the failed step and the error that caused it.
#[derive(Debug)]
pub struct OutputMsg {
    pub msg: String,
    pub err: Option<FetchError>,
}

impl OutputMsg {
    /// Silent success
    pub fn success() -> Self {
        Self {
            msg: String::new(),
            err: None,
        }
    }

    /// Informational message without an error
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            err: None,
        }
    }

    /// Failure described by the error's own summary
    pub fn failure(err: impl Into<FetchError>) -> Self {
        let err = err.into();
        Self {
            msg: err.summary(),
            err: Some(err),
        }
    }

    pub fn is_error(&self) -> bool {
        self.err.is_some()
    }

    /// Returns true for a success that has nothing to print
    pub fn is_silent(&self) -> bool {
        self.msg.is_empty() && self.err.is_none()
    }
}

impl fmt::Display for OutputMsg {
    /// Renders the message line, followed by an error-detail line when there is an error
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(err) = &self.err {
            write!(f, "\n\tErr Details: {}", err)?;
        }
        Ok(())
    }
}
