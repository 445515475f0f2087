pub mod button_handler;
pub mod buzzer;
pub mod led_chase;
pub mod output;
pub mod serial_console;
pub mod seven_segment;

pub use button_handler::{Button, ButtonEvent, ButtonSampler};
pub use buzzer::{startup_chime, Tone, ToneGenerator};
pub use led_chase::LedChase;
pub use output::{OutputDriver, Outputs};
pub use serial_console::SerialConsole;
pub use seven_segment::{Glyph, SevenSegment};
