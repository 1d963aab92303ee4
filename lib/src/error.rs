use std::path::PathBuf;

use image::ImageError;

pub type Result<T> = std::result::Result<T, AsciiError>;

/// Errors produced while converting an image to ASCII art
#[derive(thiserror::Error, Debug)]
pub enum AsciiError {
    #[error("failed to decode image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("failed to load font '{}': {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode image '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("palette must contain at least one glyph")]
    EmptyPalette,

    #[error(
        "image {width}x{height} is smaller than one {cell_width}x{cell_height} character cell"
    )]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

impl AsciiError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn font_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_path() {
        let err = AsciiError::font_load("/fonts/missing.ttf", "not a file");
        let msg = err.to_string();
        assert!(msg.contains("/fonts/missing.ttf"));
        assert!(msg.contains("not a file"));
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;

        let err = AsciiError::Io {
            path: PathBuf::from("out.txt"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn empty_grid_reports_dimensions() {
        let err = AsciiError::EmptyGrid {
            width: 3,
            height: 4,
            cell_width: 6,
            cell_height: 8,
        };
        assert_eq!(
            err.to_string(),
            "image 3x4 is smaller than one 6x8 character cell"
        );
    }
}
