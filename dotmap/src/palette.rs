use crate::error::DotmapError;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DotColor {
    pub name: &'static str,
    pub fill_color: &'static str,
    pub border_color: &'static str,
}

pub const PALETTE: [DotColor; 4] = [
    DotColor { name: "Red", fill_color: "#ff0000", border_color: "#cc0000" },
    DotColor { name: "Blue", fill_color: "#0000ff", border_color: "#0000cc" },
    DotColor { name: "Green", fill_color: "#00ff00", border_color: "#00cc00" },
    DotColor { name: "Yellow", fill_color: "#ffff00", border_color: "#cccc00" },
];

impl DotColor {
    pub fn by_name(name: &str) -> Option<DotColor> {
        PALETTE.iter().copied().find(|c| c.name == name)
    }
}

/// Current color selection over the fixed palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPalette {
    selected: usize,
}

impl Default for ColorPalette {
    fn default() -> Self { ColorPalette { selected: 0 } }
}

impl ColorPalette {
    pub fn new() -> Self { Self::default() }

    pub fn colors(&self) -> &'static [DotColor] { &PALETTE }

    pub fn selected(&self) -> DotColor { PALETTE[self.selected] }

    pub fn is_selected(&self, color: &DotColor) -> bool { self.selected().name == color.name }

    /// Returns false for a color outside the palette.
    pub fn select(&mut self, color: DotColor) -> bool {
        match PALETTE.iter().position(|c| c.name == color.name) {
            Some(i) => { self.selected = i; true }
            None => false,
        }
    }

    pub fn select_name(&mut self, name: &str) -> Result<DotColor, DotmapError> {
        let color = DotColor::by_name(name).ok_or_else(|| DotmapError::UnknownColor(name.to_string()))?;
        self.select(color);
        Ok(color)
    }

    pub fn select_index(&mut self, index: usize) -> Option<DotColor> {
        let color = *PALETTE.get(index)?;
        self.selected = index;
        Some(color)
    }
}
