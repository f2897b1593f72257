use std::fmt::{Display, Formatter};

/// Reasons a dialog could not be shown. Both collapse to
/// [`BoxerSelection::Error`](crate::BoxerSelection::Error) at the C boundary.
#[derive(Debug)]
pub enum DialogError {
    /// The native toolkit could not be loaded or initialized.
    ToolkitInit(anyhow::Error),
    /// Text could not be converted to the platform's native encoding.
    TextEncoding {
        argument: &'static str,
        reason: String,
    },
}

impl DialogError {
    pub fn toolkit_init(reason: impl Into<anyhow::Error>) -> Self {
        Self::ToolkitInit(reason.into())
    }

    pub fn text_encoding(argument: &'static str, reason: impl Display) -> Self {
        Self::TextEncoding {
            argument,
            reason: reason.to_string(),
        }
    }
}

impl Display for DialogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToolkitInit(error) => write!(f, "failed to initialize the toolkit: {error:#}"),
            Self::TextEncoding { argument, reason } => {
                write!(f, "failed to convert the {argument} text: {reason}")
            }
        }
    }
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ToolkitInit(error) => Some(error.as_ref()),
            Self::TextEncoding { .. } => None,
        }
    }
}

impl From<anyhow::Error> for DialogError {
    fn from(error: anyhow::Error) -> Self {
        Self::ToolkitInit(error)
    }
}

pub type Result<T> = std::result::Result<T, DialogError>;
