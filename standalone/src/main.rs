mod settings;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use keyboard_ui::layout::DEFAULT_BPM;
use keyboard_ui::{
    install_note_font, render_game_ui, song_title, transport_buttons, ControlRenderer,
    KeyboardScene, TransportCommand, UiState,
};
use rhythm_core::timing::Rounding;
use rhythm_core::{parse_numbered_param, GameConfig, PlayMode, RouteId, ScreenSize, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Piano keyboard with tempo-scaled bar lanes", long_about = None)]
struct Args {
    /// Simulated screen width in points
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Simulated screen height in points
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Initial tempo
    #[arg(long, default_value_t = DEFAULT_BPM)]
    bpm: f64,

    /// JSON file overriding layout and tempo settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType/OpenType file for key labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Song id, or "new"
    #[arg(long)]
    song: Option<String>,

    /// Print the derived geometry and bar timings, then exit
    #[arg(long)]
    probe: bool,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => match settings::load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}; using defaults", e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    let song = args.song.as_deref().and_then(|s| match parse_numbered_param(s) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("ignoring --song: {}", e);
            None
        }
    });

    if args.probe {
        probe(&args, &settings);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };
    let bpm = args.bpm;
    let font = args.font.clone();
    eframe::run_native(
        "Keys",
        options,
        Box::new(move |cc| Ok(Box::new(StandaloneApp::new(cc, settings, bpm, song, font)))),
    )
}

/// Print what the renderer would draw for the requested screen.
fn probe(args: &Args, settings: &Settings) {
    println!("=== Layout Probe ===\n");

    let screen = ScreenSize::new(args.width, args.height);
    let config = match GameConfig::from_screen(screen, settings.layout) {
        Ok(config) => config,
        Err(e) => {
            println!("Invalid layout: {}", e);
            return;
        }
    };
    println!("Screen: {}x{}", config.screen.width, config.screen.height);
    println!("Game area: {}x{}", config.game.width, config.game.height);
    println!("Key width: {:.2}", config.key_width());

    let scene = KeyboardScene::compute(&config, &settings.palette);
    println!("\n  Keys:");
    for key in &scene.keys {
        let accidental = key
            .accidental
            .as_ref()
            .and_then(|a| a.label.as_ref())
            .map(|l| l.text)
            .unwrap_or("-");
        println!(
            "    {:>2}  x={:>8.2}  key={}  accidental={}",
            key.index,
            key.white.rect.left(),
            key.label.text,
            accidental
        );
    }

    println!("\n  Tempo {} BPM:", args.bpm);
    let tempo = &settings.tempo;
    let rows = [
        ("distance per bar (px)", tempo.distance_per_bar(args.bpm)),
        (
            "bar length (ms)",
            tempo.time_from_bars(1.0, args.bpm, Rounding::Nearest),
        ),
        ("countdown (ms)", tempo.countdown_duration_ms(args.bpm)),
    ];
    for (name, value) in rows {
        match value {
            Ok(v) => println!("    {:<24}{:.2}", name, v),
            Err(e) => println!("    {:<24}error: {}", name, e),
        }
    }
}

struct NativeControls<'a> {
    bpm: &'a mut f64,
}

impl<'a> ControlRenderer for NativeControls<'a> {
    fn bpm(&self) -> f64 {
        *self.bpm
    }

    fn render_tempo(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::DragValue::new(&mut *self.bpm)
                .range(1.0..=400.0)
                .speed(1.0)
                .suffix(" BPM"),
        );
    }

    fn render_transport(&mut self, ui: &mut egui::Ui, mode: PlayMode) -> Option<TransportCommand> {
        let command = transport_buttons(ui, mode);
        if mode == PlayMode::Stopped && ui.input(|i| i.key_pressed(egui::Key::Space)) {
            return Some(TransportCommand::Start);
        }
        command
    }
}

struct StandaloneApp {
    state: UiState,
    bpm: f64,
    title: String,
}

impl StandaloneApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        bpm: f64,
        song: Option<RouteId>,
        font: Option<PathBuf>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let mut state = UiState::with_settings(settings);

        if let Some(path) = font {
            match std::fs::read(&path) {
                Ok(bytes) => match install_note_font(&cc.egui_ctx, bytes) {
                    Ok(family) => state.note_font = family,
                    Err(e) => log::warn!("{}: {}; keeping default font", path.display(), e),
                },
                Err(e) => log::warn!("cannot read {}: {}", path.display(), e),
            }
        }

        Self {
            state,
            bpm,
            title: song_title(song),
        }
    }
}

impl eframe::App for StandaloneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.title.as_str());
            let mut controls = NativeControls {
                bpm: &mut self.bpm,
            };
            let commands = render_game_ui(ui, &mut self.state, &mut controls);
            self.state.apply_all(commands);
        });
    }
}
