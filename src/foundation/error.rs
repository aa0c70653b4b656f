/// Convenience result type used across boothfx.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid caller-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The number of photos does not match what the layout needs.
    #[error("wrong photo count: layout {layout} needs {expected} photos, got {actual}")]
    WrongPhotoCount {
        /// Layout name.
        layout: String,
        /// Photos required by the layout.
        expected: usize,
        /// Photos supplied by the caller.
        actual: usize,
    },

    /// An input image could not be turned into a pixel buffer.
    #[error("decode failure for input {index}: {reason}")]
    DecodeFailure {
        /// Position of the failing input in the caller's sequence.
        index: usize,
        /// Underlying decoder message.
        reason: String,
    },

    /// Pixel access outside the buffer.
    #[error("out of bounds: ({x}, {y}) outside {width}x{height}")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },

    /// Output stream construction failed.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// Every frame of an animation was dropped.
    #[error("no frames processed: all {attempted} frames failed")]
    NoFramesProcessed {
        /// Number of frames the caller supplied.
        attempted: usize,
    },

    /// Font loading, shaping or glyph rasterization failed.
    #[error("text error: {0}")]
    Text(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::EncodeFailure`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::EncodeFailure(msg.into())
    }

    /// Build a [`BoothError::Text`] value.
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`BoothError::DecodeFailure`] value.
    pub fn decode(index: usize, reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
