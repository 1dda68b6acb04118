use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("animation frame request was rejected: {0}")]
    Request(String),

    #[error("no frame callback is installed")]
    CallbackMissing,
}

/// Source of display-synchronised frame callbacks.
///
/// A requested frame fires at most once; the owner re-requests from inside
/// the callback to keep the loop going.
pub trait FrameScheduler {
    type Handle: Copy;

    fn request(&mut self) -> Result<Self::Handle, FrameError>;

    fn cancel(&mut self, handle: Self::Handle);
}
