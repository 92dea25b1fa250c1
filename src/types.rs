//! Core types for spark-kitchen.
//!
//! Colors, text attributes, the color scheme and accessibility roles.
//! These are shared by the document, the components and the renderer.

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

// =============================================================================
// RGB Color
// =============================================================================

/// Opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a crossterm true color.
    pub fn to_crossterm(self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const UNDERLINE = 1 << 1;
        const INVERSE = 1 << 2;
    }
}

// =============================================================================
// Color Scheme
// =============================================================================

/// Light or dark presentation.
///
/// Serialized and parsed as lowercase (`"light"`, `"dark"`), which is also
/// the value of the `color-scheme` attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Slider icon shown by the toggle.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }
}

// =============================================================================
// Accessibility Roles
// =============================================================================

/// Implicit ARIA-style role of an element.
///
/// Used by the test locators and by the renderer to decide how a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    List,
    ListItem,
    Heading { level: u8 },
    Button,
    TextBox,
    Form,
}

impl Role {
    /// Role implied by a tag name and its `type`/`role` attributes.
    pub fn from_tag(tag: &str, type_attr: Option<&str>, role_attr: Option<&str>) -> Option<Self> {
        if let Some(role) = role_attr {
            return Self::from_name(role);
        }
        match tag {
            "ul" | "ol" => Some(Self::List),
            "li" => Some(Self::ListItem),
            "button" => Some(Self::Button),
            "form" => Some(Self::Form),
            "input" => match type_attr.unwrap_or("text") {
                "text" | "search" => Some(Self::TextBox),
                "submit" | "button" => Some(Self::Button),
                _ => None,
            },
            _ => tag
                .strip_prefix('h')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|level| (1..=6).contains(level))
                .map(|level| Self::Heading { level }),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "list" => Some(Self::List),
            "listitem" => Some(Self::ListItem),
            "button" => Some(Self::Button),
            "textbox" | "searchbox" => Some(Self::TextBox),
            "form" | "search" => Some(Self::Form),
            "heading" => Some(Self::Heading { level: 2 }),
            _ => None,
        }
    }
}
