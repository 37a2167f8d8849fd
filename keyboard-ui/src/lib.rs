pub mod fonts;
pub mod keyboard;
pub mod lanes;
pub mod layout;

pub use fonts::{install_note_font, FontError, NOTE_FONT_FILE};
pub use keyboard::{KeyboardScene, PianoKeyboard};
pub use lanes::BarLanes;
pub use layout::{render_game_ui, song_title, transport_buttons, ControlRenderer, TransportCommand, UiState};
