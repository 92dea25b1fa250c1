//! Theme - terminal colors for each color scheme.
//!
//! The renderer only needs four semantic colors. Which palette is active
//! follows the application color scheme held by [`crate::AppContext`].
//!
//! # Example
//!
//! ```ignore
//! use spark_kitchen::theme::palette;
//! use spark_kitchen::ColorScheme;
//!
//! let dark = palette(ColorScheme::Dark);
//! let fg = dark.foreground.to_crossterm();
//! ```

use crate::types::{ColorScheme, Rgb};

/// Semantic colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    /// Buttons and focused controls.
    pub accent: Rgb,
    /// Placeholders and secondary text.
    pub muted: Rgb,
}

/// Light palette (GitHub-like paper colors).
pub const LIGHT: Palette = Palette {
    background: Rgb::new(250, 250, 250),
    foreground: Rgb::new(32, 33, 36),
    accent: Rgb::new(26, 115, 232),
    muted: Rgb::new(128, 134, 139),
};

/// Dark palette (Catppuccin Mocha base).
pub const DARK: Palette = Palette {
    background: Rgb::new(30, 30, 46),
    foreground: Rgb::new(205, 214, 244),
    accent: Rgb::new(137, 180, 250),
    muted: Rgb::new(108, 112, 134),
};

/// Palette for a color scheme.
pub fn palette(scheme: ColorScheme) -> Palette {
    match scheme {
        ColorScheme::Light => LIGHT,
        ColorScheme::Dark => DARK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_scheme() {
        assert_eq!(palette(ColorScheme::Light), LIGHT);
        assert_eq!(palette(ColorScheme::Dark), DARK);
        assert_ne!(LIGHT, DARK);
    }

    #[test]
    fn test_dark_background_is_darker() {
        let luma = |c: Rgb| c.r as i32 + c.g as i32 + c.b as i32;
        assert!(luma(DARK.background) < luma(LIGHT.background));
        assert!(luma(DARK.foreground) > luma(DARK.background));
    }
}
