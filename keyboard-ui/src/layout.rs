use egui;
use rhythm_core::{
    ConfigError, GameConfig, LayoutSettings, Palette, PlayMode, RouteId, ScreenSize, Settings,
    TempoSettings, TimingError, Transport,
};

use crate::keyboard::PianoKeyboard;
use crate::lanes::BarLanes;

/// Default tempo when a song does not specify one.
pub const DEFAULT_BPM: f64 = 100.0;
/// Vertical gap between the lanes and the keyboard background.
const LANE_GAP: f32 = 12.0;

/// Requests from the transport buttons, applied by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Start,
    Playback,
    Pause,
    Resume,
    Stop,
}

/// Persistent UI state that lives across frames.
pub struct UiState {
    pub bpm: f64,
    pub transport: Transport,
    pub tempo: TempoSettings,
    pub layout: LayoutSettings,
    pub palette: Palette,
    pub note_font: egui::FontFamily,
    /// Last problem shown to the user, cleared when the next frame succeeds.
    pub status: Option<String>,
    config: Option<GameConfig>,
}

impl UiState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            bpm: DEFAULT_BPM,
            transport: Transport::new(),
            tempo: settings.tempo,
            layout: settings.layout,
            palette: settings.palette,
            note_font: egui::FontFamily::Proportional,
            status: None,
            config: None,
        }
    }

    /// Geometry for `screen`, rebuilt only when the size changes.
    pub fn config_for(&mut self, screen: ScreenSize) -> Result<GameConfig, ConfigError> {
        match self.config {
            Some(config) if config.screen == screen && config.layout == self.layout => Ok(config),
            _ => {
                let config = GameConfig::from_screen(screen, self.layout)?;
                self.config = Some(config);
                Ok(config)
            }
        }
    }

    pub fn apply(&mut self, command: TransportCommand) -> Result<(), TimingError> {
        log::debug!("transport command {:?} in {:?}", command, self.transport.mode());
        match command {
            TransportCommand::Start => self.transport.start(&self.tempo, self.bpm)?,
            TransportCommand::Playback => self.transport.start_playback(),
            TransportCommand::Pause => self.transport.pause(),
            TransportCommand::Resume => self.transport.resume(),
            TransportCommand::Stop => self.transport.stop(),
        }
        Ok(())
    }

    /// Apply commands in order. The first failure is logged and recorded in
    /// `status`; the commands after it are dropped.
    pub fn apply_all(&mut self, commands: Vec<TransportCommand>) {
        for command in commands {
            if let Err(e) = self.apply(command) {
                log::warn!("{:?} failed: {}", command, e);
                self.status = Some(e.to_string());
                return;
            }
        }
    }
}

/// Heading shown above the game for a song route.
pub fn song_title(song: Option<RouteId>) -> String {
    match song.map(RouteId::id) {
        Some(Some(id)) => format!("Song #{}", id),
        Some(None) => "New song".to_string(),
        None => "Free play".to_string(),
    }
}

/// Trait for rendering the tempo and transport controls.
/// Each front end (web, native) provides its own implementation.
pub trait ControlRenderer {
    /// Tempo currently selected by the controls.
    fn bpm(&self) -> f64;
    fn render_tempo(&mut self, ui: &mut egui::Ui);
    fn render_transport(&mut self, ui: &mut egui::Ui, mode: PlayMode) -> Option<TransportCommand>;
}

/// Buttons shared by every front end.
pub fn transport_buttons(ui: &mut egui::Ui, mode: PlayMode) -> Option<TransportCommand> {
    let mut command = None;
    match mode {
        PlayMode::Stopped => {
            if ui.button("Play").clicked() {
                command = Some(TransportCommand::Start);
            }
            if ui.button("Playback").clicked() {
                command = Some(TransportCommand::Playback);
            }
        }
        PlayMode::Paused => {
            if ui.button("Resume").clicked() {
                command = Some(TransportCommand::Resume);
            }
        }
        PlayMode::Countdown | PlayMode::Playing | PlayMode::Playback => {
            if ui.button("Pause").clicked() {
                command = Some(TransportCommand::Pause);
            }
        }
    }
    if mode != PlayMode::Stopped && ui.button("Stop").clicked() {
        command = Some(TransportCommand::Stop);
    }
    command
}

/// Render the game screen: controls, bar lanes and the keyboard. Returns
/// transport commands for the caller to apply.
pub fn render_game_ui(
    ui: &mut egui::Ui,
    state: &mut UiState,
    controls: &mut dyn ControlRenderer,
) -> Vec<TransportCommand> {
    let mut commands = Vec::new();
    ui.spacing_mut().item_spacing = egui::vec2(8.0, 6.0);

    let dt_ms = ui.input(|i| i.stable_dt) as f64 * 1000.0;
    state.transport.advance(dt_ms);
    if state.transport.mode() == PlayMode::Stopped {
        state.bpm = controls.bpm();
    }

    // --- Top section: tempo + transport ---
    ui.horizontal(|ui| {
        ui.group(|ui| {
            ui.label("Tempo");
            controls.render_tempo(ui);
        });
        ui.group(|ui| {
            if let Some(cmd) = controls.render_transport(ui, state.transport.mode()) {
                commands.push(cmd);
            }
        });
        ui.label(state.transport.mode().name());
        if let Some(status) = &state.status {
            ui.colored_label(egui::Color32::from_rgb(255, 120, 120), status.as_str());
        }
    });

    ui.separator();

    // --- Game area: lanes above the keyboard ---
    let size = ui.available_size();
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let config = match state.config_for(ScreenSize::new(rect.width(), rect.height())) {
        Ok(config) => config,
        Err(e) => {
            // Window too small: nothing sensible to draw this frame.
            log::debug!("skipping game area: {}", e);
            ui.painter_at(rect).text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Window too small",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
            return commands;
        }
    };

    let current_bars = match state.transport.current_bars(&state.tempo, state.bpm) {
        Ok(bars) => bars,
        Err(e) => {
            log::warn!("cannot place bar lines: {}", e);
            state.status = Some(e.to_string());
            0.0
        }
    };

    let game_left = rect.left() + config.side_margin();
    let lanes_bottom = rect.top() + config.keyboard_top() - config.layout.key_stroke_width - LANE_GAP;
    if lanes_bottom > rect.top() {
        let lanes = BarLanes {
            rect: egui::Rect::from_min_max(
                egui::pos2(game_left, rect.top()),
                egui::pos2(game_left + config.game.width, lanes_bottom),
            ),
            config: &config,
            tempo: &state.tempo,
            bpm: state.bpm,
            current_bars,
        };
        match lanes.paint(ui) {
            Ok(()) => {
                if state.transport.mode() != PlayMode::Stopped {
                    state.status = None;
                }
            }
            Err(e) => {
                log::warn!("cannot paint lanes: {}", e);
                state.status = Some(e.to_string());
            }
        }
    }

    let keyboard = PianoKeyboard {
        rect,
        config: &config,
        palette: &state.palette,
        font: state.note_font.clone(),
    };
    keyboard.paint(ui);

    if state.transport.mode().is_game_playing() || state.transport.mode() == PlayMode::Countdown {
        ui.ctx().request_repaint();
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_state_defaults() {
        let state = UiState::new();
        assert_eq!(state.bpm, DEFAULT_BPM);
        assert_eq!(state.transport.mode(), PlayMode::Stopped);
        assert_eq!(state.note_font, egui::FontFamily::Proportional);
        assert!(state.status.is_none());
    }

    #[test]
    fn config_is_cached_per_screen_size() {
        let mut state = UiState::new();
        let a = state.config_for(ScreenSize::new(800.0, 900.0)).unwrap();
        let b = state.config_for(ScreenSize::new(800.0, 900.0)).unwrap();
        assert_eq!(a, b);
        let c = state.config_for(ScreenSize::new(1600.0, 900.0)).unwrap();
        assert!((c.game.width - 800.0).abs() < 0.01);
    }

    #[test]
    fn config_follows_layout_changes() {
        let mut state = UiState::new();
        state.config_for(ScreenSize::new(800.0, 900.0)).unwrap();
        state.layout.keyboard_height = 150.0;
        let c = state.config_for(ScreenSize::new(800.0, 900.0)).unwrap();
        assert_eq!(c.layout.keyboard_height, 150.0);
    }

    #[test]
    fn tiny_window_is_a_config_error() {
        let mut state = UiState::new();
        assert!(state.config_for(ScreenSize::new(300.0, 100.0)).is_err());
    }

    #[test]
    fn start_then_stop() {
        let mut state = UiState::new();
        state.bpm = 120.0;
        state.apply(TransportCommand::Start).unwrap();
        assert_eq!(state.transport.mode(), PlayMode::Countdown);
        assert_eq!(state.transport.elapsed_ms(), -500.0);
        state.apply(TransportCommand::Stop).unwrap();
        assert_eq!(state.transport.mode(), PlayMode::Stopped);
    }

    #[test]
    fn pause_and_resume_playback() {
        let mut state = UiState::new();
        state.apply_all(vec![TransportCommand::Playback, TransportCommand::Pause]);
        assert_eq!(state.transport.mode(), PlayMode::Paused);
        state.apply(TransportCommand::Resume).unwrap();
        assert_eq!(state.transport.mode(), PlayMode::Playback);
    }

    #[test]
    fn apply_all_stops_at_first_failure() {
        let mut state = UiState::new();
        state.bpm = -1.0;
        state.apply_all(vec![TransportCommand::Start, TransportCommand::Playback]);
        assert_eq!(state.transport.mode(), PlayMode::Stopped);
        assert_eq!(
            state.status.as_deref(),
            Some(TimingError::InvalidBpm(-1.0).to_string().as_str())
        );
    }

    #[test]
    fn settings_palette_reaches_the_state() {
        let settings = Settings {
            palette: Palette {
                background: rhythm_core::Rgb::new(1, 2, 3),
                ..Palette::default()
            },
            ..Settings::default()
        };
        let state = UiState::with_settings(settings);
        assert_eq!(state.palette.background, rhythm_core::Rgb::new(1, 2, 3));
        assert_eq!(state.tempo, TempoSettings::default());
        assert_eq!(state.layout, LayoutSettings::default());
    }

    #[test]
    fn song_titles() {
        assert_eq!(song_title(Some(RouteId::Id(42))), "Song #42");
        assert_eq!(song_title(Some(RouteId::New)), "New song");
        assert_eq!(song_title(None), "Free play");
    }

    #[test]
    fn bad_tempo_is_reported_in_status() {
        let mut state = UiState::new();
        state.bpm = -1.0;
        state.apply_all(vec![TransportCommand::Start]);
        assert_eq!(state.transport.mode(), PlayMode::Stopped);
        assert_eq!(
            state.status.as_deref(),
            Some(TimingError::InvalidBpm(-1.0).to_string().as_str())
        );
    }
}
