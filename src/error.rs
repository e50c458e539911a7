use miette::Diagnostic;
use thiserror::Error;

/// Main error type for emojigen operations
#[derive(Error, Diagnostic, Debug)]
pub enum EmojiError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(emojigen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not decode image: {message}")]
    #[diagnostic(
        code(emojigen::decode),
        help("Upload a PNG, JPEG, GIF, WebP, or BMP photo")
    )]
    Decode { message: String },

    #[error("Nothing to render: no photo and no prompt supplied")]
    #[diagnostic(
        code(emojigen::empty_input),
        help("Pass a photo or describe the face in a prompt, e.g. \"happy blue\"")
    )]
    EmptyInput,

    #[error("Invalid parameter: {message}")]
    #[diagnostic(code(emojigen::invalid_parameter))]
    InvalidParameter {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Animation format {format} is not available in this build")]
    #[diagnostic(code(emojigen::unsupported_format))]
    UnsupportedFormat { format: String },

    #[error("Encode error: {message}")]
    #[diagnostic(code(emojigen::encode))]
    Encode { message: String },
}

impl EmojiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EmojiError::InvalidParameter {
            message: message.into(),
            help: None,
        }
    }

    pub(crate) fn encode(message: impl Into<String>) -> Self {
        EmojiError::Encode {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EmojiError>;
