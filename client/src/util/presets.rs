//! Fixed palettes offered by the decoration panel and text dialog.

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;

/// A one-click emoji decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmojiPreset {
    pub glyph: &'static str,
    pub label: &'static str,
}

pub const EMOJI_PRESETS: [EmojiPreset; 12] = [
    EmojiPreset { glyph: "🐻", label: "Teddy bear" },
    EmojiPreset { glyph: "🎅", label: "Santa Claus" },
    EmojiPreset { glyph: "🎁", label: "Gift" },
    EmojiPreset { glyph: "🧦", label: "Stocking" },
    EmojiPreset { glyph: "🦌", label: "Reindeer" },
    EmojiPreset { glyph: "⛄", label: "Snowman" },
    EmojiPreset { glyph: "🔔", label: "Bell" },
    EmojiPreset { glyph: "🍎", label: "Apple" },
    EmojiPreset { glyph: "🍬", label: "Candy" },
    EmojiPreset { glyph: "🕯️", label: "Candle" },
    EmojiPreset { glyph: "❄️", label: "Snowflake" },
    EmojiPreset { glyph: "🎩", label: "Top hat" },
];

/// Swatches in the text dialog, as entered; the store canonicalizes them.
pub const TEXT_COLORS: [&str; 10] = [
    "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500", "#800080",
];

/// Usage hints listed under the panel.
pub const TIPS: [&str; 5] = [
    "Click a decoration to add it to the tree",
    "Drag a decoration to move it",
    "Scroll over a decoration to resize it",
    "Double-click a decoration to rotate it",
    "Right-click a decoration to remove it",
];
