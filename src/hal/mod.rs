//! ATmega328P peripherals used by the game board

pub mod adc;
pub mod gpio;
pub mod power;
pub mod timer;
pub mod tone;
pub mod uart;

pub use adc::Adc;
pub use gpio::{board, Input, Output, Pin};
pub use power::Power;
pub use timer::{Delay, Millis};
pub use tone::Buzzer;
pub use uart::Uart;
