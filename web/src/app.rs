use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use keyboard_ui::{install_note_font, render_game_ui, song_title, UiState, NOTE_FONT_FILE};
use rhythm_core::RouteId;

use crate::font_loader::fetch_bytes;
use crate::web_controls::{WebControls, WebParams};

pub struct KeysWebApp {
    state: UiState,
    params: WebParams,
    song: Option<RouteId>,
    /// Font bytes handed over by the fetch future, installed on the next frame.
    pending_font: Rc<RefCell<Option<Vec<u8>>>>,
}

impl KeysWebApp {
    pub fn new(cc: &eframe::CreationContext<'_>, song: Option<RouteId>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let app = Self {
            state: UiState::new(),
            params: WebParams::default(),
            song,
            pending_font: Rc::new(RefCell::new(None)),
        };
        app.load_font(cc.egui_ctx.clone());
        app
    }

    fn load_font(&self, ctx: egui::Context) {
        let pending = self.pending_font.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_bytes(NOTE_FONT_FILE).await {
                Ok(bytes) => {
                    *pending.borrow_mut() = Some(bytes);
                    ctx.request_repaint();
                }
                Err(e) => {
                    log::warn!("could not fetch {}: {:?}", NOTE_FONT_FILE, e);
                }
            }
        });
    }

    fn install_pending_font(&mut self, ctx: &egui::Context) {
        let Some(bytes) = self.pending_font.borrow_mut().take() else {
            return;
        };
        match install_note_font(ctx, bytes) {
            Ok(family) => self.state.note_font = family,
            Err(e) => log::warn!("{} rejected, keeping default font: {}", NOTE_FONT_FILE, e),
        }
    }

}

impl eframe::App for KeysWebApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.install_pending_font(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(keyboard_ui::keyboard::color32(
                self.state.palette.background,
            )))
            .show(ctx, |ui| {
                ui.heading(song_title(self.song));
                let mut controls = WebControls {
                    params: &mut self.params,
                };
                let commands = render_game_ui(ui, &mut self.state, &mut controls);
                self.state.apply_all(commands);
            });

        if self.params.take_changed() {
            log::info!("tempo set to {} BPM", self.params.bpm);
        }
    }
}
