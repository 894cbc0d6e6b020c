use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackdropError {
    #[error("invalid {what} geometry: {reason}")]
    InvalidGeometry {
        what: &'static str,
        reason: String,
    },

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("theme index {0} is out of range")]
    ThemeIndexOutOfRange(usize),
}

impl BackdropError {
    pub(crate) fn geometry(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            what,
            reason: reason.into(),
        }
    }
}

pub type BackdropResult<T> = Result<T, BackdropError>;
