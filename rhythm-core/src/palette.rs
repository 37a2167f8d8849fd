#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("expected a colour like #RRGGBB, got {0:?}")]
    Malformed(String),
}

/// An opaque 8-bit RGB colour, stored in settings files as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(try_from = "String", into = "String"))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PaletteError::Malformed(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PaletteError::Malformed(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = PaletteError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&hex)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

pub const BG_COLOR: Rgb = Rgb::new(0x10, 0x10, 0x10);
pub const BLACK_KEY_COLOR: Rgb = Rgb::new(0x20, 0x20, 0x20);
pub const WHITE_KEY_COLOR: Rgb = Rgb::new(0xFE, 0xFE, 0xFE);
/// Bottom stop of the white key gradient.
pub const WHITE_KEY_SHADE: Rgb = Rgb::new(0xED, 0xED, 0xED);
/// Label colour on white keys.
pub const LABEL_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Pastel colour per white key.
pub const KEY_NOTE_COLORS: [Rgb; 10] = [
    Rgb::new(0xFF, 0xB6, 0xB9),
    Rgb::new(0xFF, 0xC8, 0xA2),
    Rgb::new(0xFF, 0xEB, 0xAE),
    Rgb::new(0xCF, 0xFF, 0xE5),
    Rgb::new(0xBA, 0xE7, 0xFF),
    Rgb::new(0xB5, 0xC7, 0xFF),
    Rgb::new(0xC6, 0xB5, 0xFF),
    Rgb::new(0xFF, 0xB5, 0xFF),
    Rgb::new(0xFF, 0xB5, 0xD9),
    Rgb::new(0xFF, 0xB5, 0xB5),
];

/// Saturated colour per accidental, indexed like the white key it precedes.
pub const ACCIDENTAL_NOTE_COLORS: [Rgb; 10] = [
    Rgb::new(0xFF, 0x7A, 0x7A),
    Rgb::new(0xFF, 0xA9, 0x4D),
    Rgb::new(0xFF, 0xD7, 0x47),
    Rgb::new(0x9D, 0xFF, 0xB0),
    Rgb::new(0x7A, 0xBD, 0xFF),
    Rgb::new(0x6A, 0x8A, 0xFF),
    Rgb::new(0x8A, 0x6A, 0xFF),
    Rgb::new(0xFF, 0x6A, 0xFF),
    Rgb::new(0xFF, 0x6A, 0xCD),
    Rgb::new(0xFF, 0x6A, 0x6A),
];

pub fn key_note_color(index: usize) -> Option<Rgb> {
    KEY_NOTE_COLORS.get(index).copied()
}

pub fn accidental_note_color(index: usize) -> Option<Rgb> {
    ACCIDENTAL_NOTE_COLORS.get(index).copied()
}

/// Colours used to paint the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Palette {
    pub background: Rgb,
    pub black_key: Rgb,
    pub white_key: Rgb,
    pub white_key_shade: Rgb,
    pub label: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: BG_COLOR,
            black_key: BLACK_KEY_COLOR,
            white_key: WHITE_KEY_COLOR,
            white_key_shade: WHITE_KEY_SHADE,
            label: LABEL_COLOR,
        }
    }
}
