use image::Rgb;
use serde::{Deserialize, Serialize};

/// One dominant color and the fraction of the source image it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub color: [u8; 3],
    pub weight: f64,
}

impl ColorEntry {
    pub fn new(color: [u8; 3], weight: f64) -> Self {
        Self { color, weight }
    }

    pub fn rgb(&self) -> Rgb<u8> {
        Rgb(self.color)
    }
}

/// Ordered list of colors, rendered left to right. Weights need not sum to 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    entries: Vec<ColorEntry>,
}

impl Palette {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: ColorEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter()
    }
}

impl FromIterator<ColorEntry> for Palette {
    fn from_iter<T: IntoIterator<Item = ColorEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
