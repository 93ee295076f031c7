use std::path::PathBuf;

/// Errors surfaced by the engine.
///
/// Everything except `Surface` happens during startup and aborts the program
/// before the first frame. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A math or bitmap input is outside its valid range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// The image file does not exist or cannot be opened.
    #[error("image file {path:?} could not be opened")]
    ImageNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image file exists but is corrupt or in an unsupported format.
    #[error("image file {path:?} could not be decoded")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A GPU object (shader, texture, surface, device) could not be created.
    #[error("resource creation failed: {0}")]
    ResourceCreation(String),

    /// The requested backend name is not one of the known APIs.
    #[error("unknown graphics backend {0:?} (expected one of: d3d11, d3d12, vk, gl)")]
    BackendSelection(String),

    /// The backend is known but no adapter supports it on this machine.
    #[error("backend {backend} is not available: {reason}")]
    BackendUnavailable {
        backend: crate::device::Backend,
        reason: String,
    },

    /// The presentation surface failed in a way that cannot be recovered.
    #[error("surface error: {0}")]
    Surface(String),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
