use std::{fmt, sync::Arc};

/// Error type returned by [`DisplaySurface`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Writing to the underlying sink failed.
    Write { context: Arc<str> },

    /// A lock guarding the surface content was poisoned.
    Poisoned,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { context } => write!(f, "failed to write to display surface: {}", context),
            Self::Poisoned => write!(f, "display surface state is poisoned"),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl SurfaceError {
    /// Create a write error with contextual information.
    pub fn write(context: impl Into<String>) -> Self {
        Self::Write {
            context: Arc::<str>::from(context.into()),
        }
    }
}

impl From<std::io::Error> for SurfaceError {
    fn from(value: std::io::Error) -> Self {
        SurfaceError::write(value.to_string())
    }
}

/// A text-bearing region of the UI owned by the host.
///
/// Implementations use interior mutability so a single handle can be shared
/// between the widget and its refresh task.
pub trait DisplaySurface: fmt::Debug + Send + Sync {
    /// Replace the whole textual content of the surface.
    fn replace_text(&self, text: &str) -> Result<(), SurfaceError>;

    /// Return the content most recently written to the surface.
    fn text(&self) -> Result<String, SurfaceError>;
}
