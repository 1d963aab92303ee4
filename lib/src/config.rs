use std::path::PathBuf;

use crate::error::{AsciiError, Result};
use crate::font::{DEFAULT_FONT_SIZE, FontPolicy};
use crate::lut::Charset;

/// Largest accepted font size in pixels per em
pub const MAX_FONT_SIZE: u32 = 512;

/// Configuration for ASCII art conversion
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Palette
    pub charset: Charset, // default Ascii

    /// Glyphs
    pub font_path: Option<PathBuf>, // default None (built-in bitmap glyphs)
    pub font_size: u32,             // 1-512 px/em, default 6
    pub font_policy: FontPolicy,    // default Fallback

    /// Input
    pub resize: Option<(u32, u32)>, // resize before processing, default None

    /// Rendering
    pub bg_color: [u8; 3], // RGB, default black [0, 0, 0]
    pub restore_size: bool, // scale rendered image back to source size, default true
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            // Palette
            charset: Charset::Ascii,

            // Glyphs
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
            font_policy: FontPolicy::Fallback,

            // Input
            resize: None,

            // Rendering
            bg_color: [0, 0, 0],
            restore_size: true,
        }
    }
}

impl AsciiConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.font_size < 1 || self.font_size > MAX_FONT_SIZE {
            return Err(AsciiError::invalid_config(format!(
                "font_size must be between 1 and {MAX_FONT_SIZE}, got {}",
                self.font_size
            )));
        }
        if let Some((width, height)) = self.resize {
            if width == 0 || height == 0 {
                return Err(AsciiError::invalid_config(format!(
                    "resize dimensions must be non-zero, got {width}x{height}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AsciiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.font_size, 6);
        assert!(config.restore_size);
    }

    #[test]
    fn test_invalid_font_size() {
        let mut config = AsciiConfig::default();
        config.font_size = 0;
        assert!(config.validate().is_err());

        config.font_size = MAX_FONT_SIZE + 1;
        assert!(config.validate().is_err());

        config.font_size = MAX_FONT_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_resize() {
        let mut config = AsciiConfig::default();
        config.resize = Some((0, 850));
        assert!(matches!(
            config.validate(),
            Err(AsciiError::InvalidConfig(_))
        ));

        config.resize = Some((850, 850));
        assert!(config.validate().is_ok());
    }
}
