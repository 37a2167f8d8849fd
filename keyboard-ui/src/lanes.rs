use egui;
use rhythm_core::keys::has_accidental_before;
use rhythm_core::palette::{accidental_note_color, key_note_color};
use rhythm_core::{GameConfig, Rounding, TempoSettings, TimingError};

use crate::keyboard::color32;

/// Distance from the left edge of the lanes to the hit line, in points.
pub const HIT_LINE_OFFSET: f32 = 40.0;
const MAX_BAR_LINES: usize = 256;
const LANE_ALPHA: u8 = 36;
const ACCIDENTAL_ALPHA: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLine {
    /// Zero-based bar index. Negative bars belong to the countdown.
    pub bar: i64,
    pub x: f32,
}

impl BarLine {
    pub fn is_countdown(&self) -> bool {
        self.bar < 0
    }
}

/// One horizontal lane per white key with bar lines scrolling toward the hit
/// line as the song advances.
pub struct BarLanes<'a> {
    pub rect: egui::Rect,
    pub config: &'a GameConfig,
    pub tempo: &'a TempoSettings,
    pub bpm: f64,
    pub current_bars: f64,
}

impl<'a> BarLanes<'a> {
    pub fn hit_line_x(&self) -> f32 {
        self.rect.left() + HIT_LINE_OFFSET
    }

    /// Bar lines whose x falls inside the lane rect, left to right.
    pub fn bar_lines(&self) -> Result<Vec<BarLine>, TimingError> {
        let per_bar = self.tempo.distance_per_bar(self.bpm)?;
        let hit_x = self.hit_line_x() as f64;
        let left = self.rect.left() as f64;
        let right = self.rect.right() as f64;

        let first = (self.current_bars - (hit_x - left) / per_bar).ceil() as i64;
        let last = (self.current_bars + (right - hit_x) / per_bar).floor() as i64;

        let mut lines = Vec::new();
        for bar in first..=last {
            if lines.len() >= MAX_BAR_LINES {
                log::debug!("bar lines capped at {}", MAX_BAR_LINES);
                break;
            }
            let offset = self.tempo.distance_from_bars(
                bar as f64 - self.current_bars,
                self.bpm,
                Rounding::Exact,
            )?;
            lines.push(BarLine {
                bar,
                x: (hit_x + offset) as f32,
            });
        }
        Ok(lines)
    }

    fn lane_rect(&self, index: usize) -> egui::Rect {
        let count = self.config.layout.white_key_count.max(1);
        let height = self.rect.height() / count as f32;
        egui::Rect::from_min_size(
            egui::pos2(self.rect.left(), self.rect.top() + index as f32 * height),
            egui::vec2(self.rect.width(), height),
        )
    }

    /// Half-height strip straddling the border above lane `index`, present
    /// where the keyboard has an accidental before that key.
    fn accidental_rect(&self, index: usize) -> Option<egui::Rect> {
        if index == 0 || index >= self.config.layout.white_key_count || !has_accidental_before(index) {
            return None;
        }
        let lane = self.lane_rect(index);
        Some(egui::Rect::from_center_size(
            egui::pos2(lane.center().x, lane.top()),
            egui::vec2(lane.width(), lane.height() / 2.0),
        ))
    }

    pub fn paint(&self, ui: &egui::Ui) -> Result<(), TimingError> {
        let painter = ui.painter_at(self.rect);

        for i in 0..self.config.layout.white_key_count {
            if let Some(rgb) = key_note_color(i) {
                let fill = egui::Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, LANE_ALPHA);
                painter.rect_filled(self.lane_rect(i), 0.0, fill);
            }
        }
        for i in 0..self.config.layout.white_key_count {
            if let (Some(rect), Some(rgb)) = (self.accidental_rect(i), accidental_note_color(i)) {
                let fill =
                    egui::Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, ACCIDENTAL_ALPHA);
                painter.rect_filled(rect, 0.0, fill);
            }
        }

        let bar_stroke = egui::Stroke::new(1.5, egui::Color32::from_gray(160));
        let countdown_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(70));
        let number_font = egui::FontId::proportional(12.0);
        for line in self.bar_lines()? {
            let stroke = if line.is_countdown() {
                countdown_stroke
            } else {
                bar_stroke
            };
            painter.line_segment(
                [
                    egui::pos2(line.x, self.rect.top()),
                    egui::pos2(line.x, self.rect.bottom()),
                ],
                stroke,
            );
            if !line.is_countdown() {
                painter.text(
                    egui::pos2(line.x + 3.0, self.rect.top() + 2.0),
                    egui::Align2::LEFT_TOP,
                    format!("{}", line.bar + 1),
                    number_font.clone(),
                    stroke.color,
                );
            }
        }

        let hit_x = self.hit_line_x();
        painter.line_segment(
            [
                egui::pos2(hit_x, self.rect.top()),
                egui::pos2(hit_x, self.rect.bottom()),
            ],
            egui::Stroke::new(3.0, color32(rhythm_core::palette::WHITE_KEY_COLOR)),
        );
        Ok(())
    }
}
