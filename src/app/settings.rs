// MindMap - app/settings.rs
//
// Global node font settings and per-node style resolution.
// Per-node overrides win over the global settings; without a global colour
// nodes are tinted by depth.

use crate::core::model::{format_hex_colour, parse_hex_colour, Node};
use crate::util::constants;

/// Node text colours by depth. Deeper nodes reuse the last entry.
pub const DEPTH_PALETTE: [[u8; 3]; 4] = [
    [30, 60, 150],
    [50, 90, 180],
    [70, 110, 200],
    [90, 130, 220],
];

/// User-selected font settings for mind-map nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    font_size: u32,
    /// `#RRGGBB`; `None` selects the depth palette.
    font_color: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: constants::DEFAULT_FONT_SIZE,
            font_color: None,
        }
    }
}

impl Settings {
    /// Build settings from possibly stale persisted values.
    ///
    /// Values that fail validation are replaced by defaults.
    pub fn from_parts(font_size: u32, font_color: Option<String>) -> Self {
        let mut settings = Self::default();
        settings.set_font_size(font_size);
        settings.set_font_color(font_color);
        settings
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn font_color(&self) -> Option<&str> {
        self.font_color.as_deref()
    }

    /// Set the font size. Returns false (and changes nothing) when the size
    /// is outside `MIN_FONT_SIZE..=MAX_FONT_SIZE`.
    pub fn set_font_size(&mut self, size: u32) -> bool {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            self.font_size = size;
            true
        } else {
            tracing::debug!(size, "Font size out of range; ignored");
            false
        }
    }

    /// Set or clear the global colour. The colour is normalised to
    /// uppercase `#RRGGBB`; an unparseable colour is rejected.
    pub fn set_font_color(&mut self, colour: Option<String>) -> bool {
        match colour {
            None => {
                self.font_color = None;
                true
            }
            Some(c) => match parse_hex_colour(&c) {
                Some(rgb) => {
                    self.font_color = Some(format_hex_colour(rgb));
                    true
                }
                None => {
                    tracing::debug!(colour = %c, "Invalid font colour; ignored");
                    false
                }
            },
        }
    }

    /// Font size used to draw `node`.
    pub fn node_font_size(&self, node: &Node) -> u32 {
        node.font_size().unwrap_or(self.font_size)
    }

    /// Text colour used to draw `node` at `depth`.
    pub fn node_colour(&self, node: &Node, depth: usize) -> [u8; 3] {
        node.font_color()
            .and_then(parse_hex_colour)
            .or_else(|| self.font_color.as_deref().and_then(parse_hex_colour))
            .unwrap_or_else(|| depth_colour(depth))
    }
}

/// Palette colour for a node at `depth`.
pub fn depth_colour(depth: usize) -> [u8; 3] {
    DEPTH_PALETTE[depth.min(DEPTH_PALETTE.len() - 1)]
}
