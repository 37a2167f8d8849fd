use eframe::egui;
use keyboard_ui::layout::DEFAULT_BPM;
use keyboard_ui::{transport_buttons, ControlRenderer, TransportCommand};
use rhythm_core::PlayMode;

pub const MIN_BPM: f64 = 30.0;
pub const MAX_BPM: f64 = 300.0;

/// Control values held on the main (UI) thread.
pub struct WebParams {
    pub bpm: f64,
    /// Set when the tempo slider moved this frame.
    pub bpm_changed: bool,
}

impl WebParams {
    /// Returns whether the tempo changed since the last call.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.bpm_changed)
    }
}

impl Default for WebParams {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            bpm_changed: false,
        }
    }
}

/// Wraps WebParams to implement ControlRenderer using plain egui widgets.
pub struct WebControls<'a> {
    pub params: &'a mut WebParams,
}

impl<'a> ControlRenderer for WebControls<'a> {
    fn bpm(&self) -> f64 {
        self.params.bpm
    }

    fn render_tempo(&mut self, ui: &mut egui::Ui) {
        let prev = self.params.bpm;
        ui.add(
            egui::Slider::new(&mut self.params.bpm, MIN_BPM..=MAX_BPM)
                .suffix(" BPM")
                .step_by(1.0),
        );
        if (self.params.bpm - prev).abs() > f64::EPSILON {
            self.params.bpm_changed = true;
        }
    }

    fn render_transport(&mut self, ui: &mut egui::Ui, mode: PlayMode) -> Option<TransportCommand> {
        transport_buttons(ui, mode)
    }
}
