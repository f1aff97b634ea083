//! Display colors and the class → color lookup.
//!
//! Colors are written in the config the way plotting tools accept them:
//! `#rrggbb`, `#rgb`, single-letter codes (`r`, `g`, `b`, ...), CSS names
//! (`red`, `orange`, ...) or the `tab:` palette (`tab:blue`, ...).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PairviewError;

/// Key of the mandatory fallback entry in a [`ColorMap`].
pub const DEFAULT_KEY: &str = "default";

/// An opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as an RGBA pixel with full opacity.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, u8::MAX])
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("b", Color::rgb(0, 0, 255)),
    ("g", Color::rgb(0, 128, 0)),
    ("r", Color::rgb(255, 0, 0)),
    ("c", Color::rgb(0, 191, 191)),
    ("m", Color::rgb(191, 0, 191)),
    ("y", Color::rgb(191, 191, 0)),
    ("k", Color::rgb(0, 0, 0)),
    ("w", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("pink", Color::rgb(255, 192, 203)),
    ("brown", Color::rgb(165, 42, 42)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("lime", Color::rgb(0, 255, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("olive", Color::rgb(128, 128, 0)),
    ("teal", Color::rgb(0, 128, 128)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("gold", Color::rgb(255, 215, 0)),
    ("violet", Color::rgb(238, 130, 238)),
    ("tab:blue", Color::rgb(31, 119, 180)),
    ("tab:orange", Color::rgb(255, 127, 14)),
    ("tab:green", Color::rgb(44, 160, 44)),
    ("tab:red", Color::rgb(214, 39, 40)),
    ("tab:purple", Color::rgb(148, 103, 189)),
    ("tab:brown", Color::rgb(140, 86, 75)),
    ("tab:pink", Color::rgb(227, 119, 194)),
    ("tab:gray", Color::rgb(127, 127, 127)),
    ("tab:olive", Color::rgb(188, 189, 34)),
    ("tab:cyan", Color::rgb(23, 190, 207)),
];

impl FromStr for Color {
    type Err = PairviewError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        let invalid = || PairviewError::InvalidColor(raw.to_string());

        if let Some(hex) = value.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
            return match hex.len() {
                6 => Ok(Color::rgb(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                // #rgb expands each digit: #f80 == #ff8800
                3 => Ok(Color::rgb(
                    channel(&hex[0..1])? * 17,
                    channel(&hex[1..2])? * 17,
                    channel(&hex[2..3])? * 17,
                )),
                _ => Err(invalid()),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Color {
    type Error = PairviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Class name → color lookup with a mandatory fallback.
///
/// In JSON this is a flat object whose `"default"` key is required:
/// `{"person": "red", "default": "yellow"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Color>",
    into = "BTreeMap<String, Color>"
)]
pub struct ColorMap {
    default: Color,
    classes: BTreeMap<String, Color>,
}

impl ColorMap {
    /// Creates a colormap with only a fallback color.
    pub fn new(default: Color) -> Self {
        Self {
            default,
            classes: BTreeMap::new(),
        }
    }

    /// Adds or replaces the color for `class_name`.
    pub fn with_class(mut self, class_name: impl Into<String>, color: Color) -> Self {
        self.insert(class_name, color);
        self
    }

    /// Adds or replaces the color for `class_name`. Inserting `"default"`
    /// replaces the fallback.
    pub fn insert(&mut self, class_name: impl Into<String>, color: Color) {
        let class_name = class_name.into();
        if class_name == DEFAULT_KEY {
            self.default = color;
        } else {
            self.classes.insert(class_name, color);
        }
    }

    /// The fallback color for classes that are not mapped.
    pub fn default_color(&self) -> Color {
        self.default
    }

    /// Returns the color mapped to `class_name`, if any.
    pub fn get(&self, class_name: &str) -> Option<Color> {
        self.classes.get(class_name).copied()
    }

    /// Returns the color for `class_name`, falling back to the default.
    pub fn color_for(&self, class_name: &str) -> Color {
        self.get(class_name).unwrap_or(self.default)
    }

    /// Returns true if `class_name` has its own entry.
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(Color::RED)
    }
}

impl TryFrom<BTreeMap<String, Color>> for ColorMap {
    type Error = PairviewError;

    fn try_from(mut entries: BTreeMap<String, Color>) -> Result<Self, Self::Error> {
        let default = entries
            .remove(DEFAULT_KEY)
            .ok_or(PairviewError::ColorMapMissingDefault)?;
        Ok(Self {
            default,
            classes: entries,
        })
    }
}

impl From<ColorMap> for BTreeMap<String, Color> {
    fn from(colormap: ColorMap) -> Self {
        let mut entries = colormap.classes;
        entries.insert(DEFAULT_KEY.to_string(), colormap.default);
        entries
    }
}
