//! Screen and keyboard geometry.
//!
//! The host reports the window size once; everything else is derived from it
//! here and handed to the renderer by reference.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::KEY_COUNT;
use crate::palette::Palette;
use crate::timing::TempoSettings;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen size must be positive and finite, got {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },

    #[error("white key count must be between 1 and {max}, got {count}")]
    InvalidKeyCount { count: usize, max: usize },

    #[error("keyboard height must be positive, got {0}")]
    InvalidKeyboardHeight(f32),

    #[error("keyboard height {keyboard} does not fit in a game area {game} high")]
    KeyboardTooTall { keyboard: f32, game: f32 },

    #[error("`{setting}` must be in (0, 1], got {value}")]
    InvalidGameRatio { setting: &'static str, value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Fixed layout values that do not depend on the device.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct LayoutSettings {
    pub keyboard_height: f32,
    pub key_stroke_width: f32,
    pub white_key_count: usize,
    pub key_corner_radius: f32,
    pub note_font_size: f32,
    /// Screens wider than this use `wide_game_ratio` of their width.
    pub wide_screen_threshold: f32,
    pub wide_game_ratio: f32,
    pub narrow_game_ratio: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            keyboard_height: 200.0,
            key_stroke_width: 4.0,
            white_key_count: KEY_COUNT,
            key_corner_radius: 5.0,
            note_font_size: 25.0,
            wide_screen_threshold: 1000.0,
            wide_game_ratio: 0.5,
            narrow_game_ratio: 0.9,
        }
    }
}

impl LayoutSettings {
    /// Checks that do not depend on the screen size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.white_key_count == 0 || self.white_key_count > KEY_COUNT {
            return Err(ConfigError::InvalidKeyCount {
                count: self.white_key_count,
                max: KEY_COUNT,
            });
        }
        if !(self.keyboard_height > 0.0) {
            return Err(ConfigError::InvalidKeyboardHeight(self.keyboard_height));
        }
        let ratios = [
            ("wide_game_ratio", self.wide_game_ratio),
            ("narrow_game_ratio", self.narrow_game_ratio),
        ];
        for (setting, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidGameRatio { setting, value });
            }
        }
        Ok(())
    }
}

/// Everything a front end can override from a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Settings {
    pub layout: LayoutSettings,
    pub tempo: TempoSettings,
    pub palette: Palette,
}

/// Device-dependent geometry, computed once per screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub screen: ScreenSize,
    pub game: ScreenSize,
    pub layout: LayoutSettings,
}

impl GameConfig {
    pub fn from_screen(screen: ScreenSize, layout: LayoutSettings) -> Result<Self, ConfigError> {
        if !screen.is_valid() {
            return Err(ConfigError::InvalidScreen {
                width: screen.width,
                height: screen.height,
            });
        }
        layout.validate()?;

        let ratio = if screen.width > layout.wide_screen_threshold {
            layout.wide_game_ratio
        } else {
            layout.narrow_game_ratio
        };
        let game = ScreenSize::new(screen.width * ratio, screen.height);
        if layout.keyboard_height > game.height {
            return Err(ConfigError::KeyboardTooTall {
                keyboard: layout.keyboard_height,
                game: game.height,
            });
        }

        log::debug!(
            "game area {}x{} on a {}x{} screen",
            game.width,
            game.height,
            screen.width,
            screen.height
        );
        Ok(Self {
            screen,
            game,
            layout,
        })
    }

    pub fn key_width(&self) -> f32 {
        self.game.width / self.layout.white_key_count as f32
    }

    /// Y coordinate of the top edge of the keys, in game coordinates.
    pub fn keyboard_top(&self) -> f32 {
        self.game.height - self.layout.keyboard_height
    }

    /// Horizontal gap between the screen edge and the centred game area.
    pub fn side_margin(&self) -> f32 {
        (self.screen.width - self.game.width) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: f32, height: f32) -> GameConfig {
        GameConfig::from_screen(ScreenSize::new(width, height), LayoutSettings::default()).unwrap()
    }

    // --- Defaults ---

    #[test]
    fn default_layout_matches_keyboard_constants() {
        let layout = LayoutSettings::default();
        assert_eq!(layout.keyboard_height, 200.0);
        assert_eq!(layout.key_stroke_width, 4.0);
        assert_eq!(layout.white_key_count, 10);
        assert_eq!(layout.key_corner_radius, 5.0);
    }

    // --- Game area ---

    #[test]
    fn narrow_screen_uses_ninety_percent() {
        let c = config(400.0, 800.0);
        assert!((c.game.width - 360.0).abs() < 0.01);
        assert_eq!(c.game.height, 800.0);
    }

    #[test]
    fn wide_screen_uses_half_width() {
        let c = config(1920.0, 1080.0);
        assert!((c.game.width - 960.0).abs() < 0.01);
    }

    #[test]
    fn threshold_width_counts_as_narrow() {
        let c = config(1000.0, 700.0);
        assert!((c.game.width - 900.0).abs() < 0.01);
    }

    #[test]
    fn key_width_splits_game_width() {
        let c = config(1920.0, 1080.0);
        assert!((c.key_width() - 96.0).abs() < 0.01);
    }

    #[test]
    fn keyboard_top_and_margin() {
        let c = config(1920.0, 1080.0);
        assert!((c.keyboard_top() - 880.0).abs() < 0.01);
        assert!((c.side_margin() - 480.0).abs() < 0.01);
    }

    // --- Validation ---

    #[test]
    fn rejects_empty_screen() {
        let err = GameConfig::from_screen(ScreenSize::new(0.0, 600.0), LayoutSettings::default());
        assert!(matches!(err, Err(ConfigError::InvalidScreen { .. })));
    }

    #[test]
    fn rejects_nan_screen() {
        let err =
            GameConfig::from_screen(ScreenSize::new(f32::NAN, 600.0), LayoutSettings::default());
        assert!(matches!(err, Err(ConfigError::InvalidScreen { .. })));
    }

    #[test]
    fn rejects_key_count_outside_tables() {
        for count in [0, KEY_COUNT + 1] {
            let layout = LayoutSettings {
                white_key_count: count,
                ..LayoutSettings::default()
            };
            let err = GameConfig::from_screen(ScreenSize::new(800.0, 600.0), layout);
            assert_eq!(
                err,
                Err(ConfigError::InvalidKeyCount {
                    count,
                    max: KEY_COUNT
                })
            );
        }
    }

    #[test]
    fn rejects_keyboard_taller_than_screen() {
        let err = GameConfig::from_screen(ScreenSize::new(800.0, 150.0), LayoutSettings::default());
        assert!(matches!(err, Err(ConfigError::KeyboardTooTall { .. })));
    }

    #[test]
    fn rejects_non_positive_keyboard_height() {
        let layout = LayoutSettings {
            keyboard_height: 0.0,
            ..LayoutSettings::default()
        };
        let err = GameConfig::from_screen(ScreenSize::new(800.0, 600.0), layout);
        assert_eq!(err, Err(ConfigError::InvalidKeyboardHeight(0.0)));
    }

    #[test]
    fn rejects_game_ratios_outside_unit_range() {
        let cases = [
            (
                LayoutSettings {
                    wide_game_ratio: 0.0,
                    ..LayoutSettings::default()
                },
                "wide_game_ratio",
                0.0,
            ),
            (
                LayoutSettings {
                    narrow_game_ratio: 1.5,
                    ..LayoutSettings::default()
                },
                "narrow_game_ratio",
                1.5,
            ),
        ];
        for (layout, setting, value) in cases {
            let err = GameConfig::from_screen(ScreenSize::new(800.0, 600.0), layout);
            assert_eq!(err, Err(ConfigError::InvalidGameRatio { setting, value }));
        }
    }

    #[test]
    fn nan_ratio_is_rejected() {
        let layout = LayoutSettings {
            wide_game_ratio: f32::NAN,
            ..LayoutSettings::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ConfigError::InvalidGameRatio { setting: "wide_game_ratio", .. })
        ));
        assert_eq!(LayoutSettings::default().validate(), Ok(()));
    }

    // --- Settings files ---

    #[cfg(feature = "serialization")]
    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "layout": { "keyboard_height": 160.0 } }"#).unwrap();
        assert_eq!(settings.layout.keyboard_height, 160.0);
        assert_eq!(settings.layout.white_key_count, 10);
        assert_eq!(settings.tempo, TempoSettings::default());
        assert_eq!(settings.palette, Palette::default());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn palette_colours_are_hex_strings() {
        let settings: Settings =
            serde_json::from_str(r##"{ "palette": { "black_key": "#0A0B0C" } }"##).unwrap();
        assert_eq!(settings.palette.black_key, crate::Rgb::new(0x0A, 0x0B, 0x0C));
        assert_eq!(settings.palette.white_key, crate::palette::WHITE_KEY_COLOR);

        let json = serde_json::to_value(settings.palette).unwrap();
        assert_eq!(json["background"], "#101010");
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn malformed_palette_colour_fails_to_load() {
        let err = serde_json::from_str::<Settings>(r#"{ "palette": { "label": "black" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("#RRGGBB"), "{}", err);
    }
}
