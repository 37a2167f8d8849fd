use egui;
use rhythm_core::keys::{accidental_binding, has_accidental_before, key_binding};
use rhythm_core::{GameConfig, Palette, Rgb};

pub fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Filled rectangle behind the keys, spanning the whole screen width.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub rect: egui::Rect,
    pub color: egui::Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    /// Left end of the text baseline.
    pub pos: egui::Pos2,
    pub color: egui::Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhiteKey {
    pub rect: egui::Rect,
    pub corner_radius: f32,
    /// Vertical gradient, top to bottom.
    pub gradient: [egui::Color32; 2],
    pub stroke: egui::Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccidentalKey {
    pub rect: egui::Rect,
    pub corner_radius: f32,
    pub color: egui::Color32,
    pub label: Option<Label>,
}

/// One white key with the accidental that sits on its left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGroup {
    pub index: usize,
    pub white: WhiteKey,
    pub accidental: Option<AccidentalKey>,
    pub label: Label,
}

/// Everything needed to draw the keyboard, in game coordinates: the origin is
/// the top-left corner of the centred game area, so the background starts at a
/// negative x.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardScene {
    pub background: Panel,
    pub keys: Vec<KeyGroup>,
    pub font_size: f32,
}

impl KeyboardScene {
    pub fn compute(config: &GameConfig, palette: &Palette) -> Self {
        let layout = &config.layout;
        let key_width = config.key_width();
        let kb_height = layout.keyboard_height;
        let stroke_width = layout.key_stroke_width;
        let font = layout.note_font_size;
        let game_height = config.game.height;
        let top = config.keyboard_top();

        let background = Panel {
            rect: egui::Rect::from_min_size(
                egui::pos2(-config.side_margin(), top - stroke_width / 2.0),
                egui::vec2(config.screen.width, kb_height + stroke_width / 2.0),
            ),
            color: color32(palette.background),
        };

        let keys = (0..layout.white_key_count)
            .map(|i| {
                let x = i as f32 * key_width;
                let white = WhiteKey {
                    rect: egui::Rect::from_min_size(
                        egui::pos2(x, top),
                        egui::vec2(key_width, kb_height),
                    ),
                    corner_radius: layout.key_corner_radius,
                    gradient: [color32(palette.white_key), color32(palette.white_key_shade)],
                    stroke: egui::Stroke::new(stroke_width, color32(palette.background)),
                };

                let accidental = has_accidental_before(i).then(|| AccidentalKey {
                    rect: egui::Rect::from_min_size(
                        egui::pos2(x - key_width / 4.0, top),
                        egui::vec2(key_width / 2.0, kb_height / 2.0),
                    ),
                    corner_radius: layout.key_corner_radius,
                    color: color32(palette.black_key),
                    label: accidental_binding(i).map(|text| Label {
                        text,
                        pos: egui::pos2(
                            x - font / 2.5,
                            game_height - kb_height / 2.0 - font / 2.0,
                        ),
                        color: color32(palette.white_key),
                    }),
                });

                let label = Label {
                    text: key_binding(i).unwrap_or(""),
                    pos: egui::pos2(x + key_width / 2.0 - font / 4.0, game_height - font / 2.0),
                    color: color32(palette.label),
                };

                KeyGroup {
                    index: i,
                    white,
                    accidental,
                    label,
                }
            })
            .collect();

        Self {
            background,
            keys,
            font_size: font,
        }
    }
}

const CORNER_SEGMENTS: usize = 6;

fn mix(a: egui::Color32, b: egui::Color32, t: f32) -> egui::Color32 {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    egui::Color32::from_rgba_premultiplied(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
        channel(a.a(), b.a()),
    )
}

/// Clockwise outline of `rect` with arcs of `radius` at each corner, starting
/// at the top-left arc.
fn rounded_outline(rect: egui::Rect, radius: f32) -> Vec<egui::Pos2> {
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let corners = [
        (egui::pos2(rect.left() + r, rect.top() + r), 180.0_f32),
        (egui::pos2(rect.right() - r, rect.top() + r), 270.0),
        (egui::pos2(rect.right() - r, rect.bottom() - r), 0.0),
        (egui::pos2(rect.left() + r, rect.bottom() - r), 90.0),
    ];
    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (center, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let angle = (start + 90.0 * step as f32 / CORNER_SEGMENTS as f32).to_radians();
            points.push(center + r * egui::vec2(angle.cos(), angle.sin()));
        }
    }
    points
}

/// Vertical gradient filling the rounded rectangle, as a triangle fan.
fn gradient_mesh(rect: egui::Rect, radius: f32, [top, bottom]: [egui::Color32; 2]) -> egui::Mesh {
    let shade = |y: f32| {
        let t = if rect.height() > 0.0 {
            ((y - rect.top()) / rect.height()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        mix(top, bottom, t)
    };

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.center(), shade(rect.center().y));
    let outline = rounded_outline(rect, radius);
    for p in &outline {
        mesh.colored_vertex(*p, shade(p.y));
    }
    let n = outline.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Paints a [`KeyboardScene`] at the bottom of `rect`, which stands for the
/// whole screen.
pub struct PianoKeyboard<'a> {
    pub rect: egui::Rect,
    pub config: &'a GameConfig,
    pub palette: &'a Palette,
    pub font: egui::FontFamily,
}

impl<'a> PianoKeyboard<'a> {
    /// Screen offset of the game-coordinate origin.
    fn origin(&self) -> egui::Vec2 {
        egui::vec2(self.rect.left() + self.config.side_margin(), self.rect.top())
    }

    pub fn paint(&self, ui: &egui::Ui) {
        let scene = KeyboardScene::compute(self.config, self.palette);
        let painter = ui.painter_at(self.rect);
        let offset = self.origin();
        let font = egui::FontId::new(scene.font_size, self.font.clone());

        painter.rect_filled(
            scene.background.rect.translate(offset),
            0.0,
            scene.background.color,
        );

        // White keys first so accidentals land on top of both neighbours
        for key in &scene.keys {
            let rect = key.white.rect.translate(offset);
            painter.add(egui::Shape::mesh(gradient_mesh(
                rect,
                key.white.corner_radius,
                key.white.gradient,
            )));
            painter.rect_stroke(
                rect,
                key.white.corner_radius,
                key.white.stroke,
                egui::StrokeKind::Middle,
            );
        }

        for key in &scene.keys {
            if let Some(acc) = &key.accidental {
                painter.rect_filled(acc.rect.translate(offset), acc.corner_radius, acc.color);
                if let Some(label) = &acc.label {
                    painter.text(
                        label.pos + offset,
                        egui::Align2::LEFT_BOTTOM,
                        label.text,
                        font.clone(),
                        label.color,
                    );
                }
            }
            painter.text(
                key.label.pos + offset,
                egui::Align2::LEFT_BOTTOM,
                key.label.text,
                font.clone(),
                key.label.color,
            );
        }
    }
}
