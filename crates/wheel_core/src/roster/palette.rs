//! Segment colour assignment
//!
//! First-seen names take the next colour from a fixed palette (cycling).
//! Assignments are stable for the session, so a name keeps its colour even
//! after being drawn and re-added; only `reset` forgets them.

use std::collections::HashMap;

/// Fixed wheel palette (CSS hex)
pub const VIBRANT_COLORS: [&str; 20] = [
    "#FBC02D", "#0288D1", "#D32F2F", "#388E3C", "#F57C00", "#7B1FA2", "#C2185B", "#00796B",
    "#5D4037", "#455A64", "#FF6F00", "#4CAF50", "#2196F3", "#E91E63", "#673AB7", "#00BCD4",
    "#FFEB3B", "#9C27B0", "#8BC34A", "#FF9800",
];

#[derive(Debug, Clone, Default)]
pub struct Palette {
    assigned: HashMap<String, &'static str>,
    next_index: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour for `name`, assigning the next free one on first sight.
    pub fn assign(&mut self, name: &str) -> &'static str {
        if let Some(color) = self.get(name) {
            return color;
        }
        let color = VIBRANT_COLORS[self.next_index % VIBRANT_COLORS.len()];
        self.next_index += 1;
        self.assigned.insert(name.to_string(), color);
        color
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.assigned.get(name).copied()
    }

    /// Colour for rendering: the assigned one, else the palette slot for `index`.
    pub fn color_for(&self, name: &str, index: usize) -> &'static str {
        self.get(name).unwrap_or(VIBRANT_COLORS[index % VIBRANT_COLORS.len()])
    }

    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_gets_next_color() {
        let mut palette = Palette::new();
        assert_eq!(palette.assign("alice"), "#FBC02D");
        assert_eq!(palette.assign("bob"), "#0288D1");
        assert_eq!(palette.assign("alice"), "#FBC02D");
    }

    #[test]
    fn test_palette_cycles() {
        let mut palette = Palette::new();
        for i in 0..20 {
            palette.assign(&format!("p{}", i));
        }
        assert_eq!(palette.assign("p20"), VIBRANT_COLORS[0]);
    }

    #[test]
    fn test_reset_restarts_cursor() {
        let mut palette = Palette::new();
        palette.assign("a");
        palette.assign("b");
        palette.reset();
        assert_eq!(palette.get("a"), None);
        assert_eq!(palette.assign("b"), VIBRANT_COLORS[0]);
    }

    #[test]
    fn test_color_for_falls_back_to_slot() {
        let palette = Palette::new();
        assert_eq!(palette.color_for("ghost", 3), VIBRANT_COLORS[3]);
    }
}
