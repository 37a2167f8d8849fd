pub mod class_names;
pub mod config;
pub mod keys;
pub mod palette;
pub mod playback;
pub mod route;
pub mod timing;

pub use class_names::{cn, ClassList};
pub use config::{ConfigError, GameConfig, LayoutSettings, ScreenSize, Settings};
pub use keys::KEY_COUNT;
pub use palette::{Palette, PaletteError, Rgb};
pub use playback::{PlayMode, Transport};
pub use route::{parse_numbered_param, RouteError, RouteId};
pub use timing::{Rounding, TempoSettings, TimingError};
