use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #rrggbb"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The ten-color categorical scheme most charting libraries ship as default.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// A non-empty list of colors handed out cyclically by category rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self(colors))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, rank: usize) -> Color {
        self.0[rank % self.0.len()]
    }

    /// Color for `category` given the categories seen so far, in order.
    /// A category missing from `known` ranks as if appended to it.
    pub fn color_for(&self, category: &str, known: &[String]) -> Color {
        self.get(rank_of(category, known))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(CATEGORY10.to_vec())
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = &'static str;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Palette::new(colors).ok_or("palette needs at least one color")
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

/// [`Palette::color_for`] with the default ten-color palette.
pub fn color_for(category: &str, known: &[String]) -> Color {
    Palette::default().color_for(category, known)
}

fn rank_of(category: &str, known: &[String]) -> usize {
    let mut seen = HashSet::new();
    for name in known {
        if name == category {
            return seen.len();
        }
        seen.insert(name.as_str());
    }
    seen.len()
}

fn distinct(known: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    known
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .cloned()
        .collect()
}

/// Category to color lookup for one category sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    categories: Vec<String>,
    colors: HashMap<String, Color>,
    palette: Palette,
}

impl ColorMap {
    pub fn new(known: &[String], palette: &Palette) -> Self {
        let categories = distinct(known);
        let colors = categories
            .iter()
            .enumerate()
            .map(|(rank, c)| (c.clone(), palette.get(rank)))
            .collect();
        Self {
            categories,
            colors,
            palette: palette.clone(),
        }
    }

    pub fn get(&self, category: &str) -> Option<Color> {
        self.colors.get(category).copied()
    }

    /// Like [`ColorMap::get`], but an unknown category takes the next rank.
    pub fn color_for(&self, category: &str) -> Color {
        self.get(category)
            .unwrap_or_else(|| self.palette.get(self.categories.len()))
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// `(category, color)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.categories
            .iter()
            .map(move |c| (c.as_str(), self.colors[c.as_str()]))
    }

    fn matches(&self, known: &[String]) -> bool {
        distinct(known) == self.categories
    }
}

/// Keeps the last [`ColorMap`] and only rebuilds it when the category
/// sequence changes.
#[derive(Clone, Debug, Default)]
pub struct ColorAssigner {
    palette: Palette,
    current: Option<ColorMap>,
}

impl ColorAssigner {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            current: None,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn color_map(&mut self, known: &[String]) -> &ColorMap {
        if self.current.as_ref().is_some_and(|m| !m.matches(known)) {
            tracing::debug!(categories = known.len(), "category set changed, rebuilding colors");
            self.current = None;
        }
        let palette = &self.palette;
        self.current.get_or_insert_with(|| ColorMap::new(known, palette))
    }
}
