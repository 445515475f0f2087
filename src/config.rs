//! Configuration constants for the reaction game firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Debug console baud rate
pub const UART_BAUD: u32 = 9600;

/// Number of LEDs in the chase animation
pub const LED_COUNT: usize = 5;

/// How long the button must stay down to start the game
pub const HOLD_TO_START_MS: u32 = 3000;

/// Quiet period after a detected short press
pub const PRESS_QUIET_MS: u32 = 200;

/// Countdown starts from this digit
pub const COUNTDOWN_FROM: u8 = 3;

/// One displayed second
pub const SECOND_MS: u32 = 1000;

/// Random pre-round delay, inclusive lower and exclusive upper bound
pub const RANDOM_DELAY_MIN_MS: u32 = 2000;
pub const RANDOM_DELAY_MAX_MS: u32 = 5000;

/// Time each LED stays lit during the chase
pub const CHASE_DWELL_MS: u32 = 200;

/// Countdown and reaction-window tick cue
pub const TICK_TONE_HZ: u16 = 500;
pub const TICK_TONE_MS: u16 = 100;

/// Outcome cues
pub const SUCCESS_TONE_HZ: u16 = 1000;
pub const FAILURE_TONE_HZ: u16 = 300;
pub const RESULT_TONE_MS: u16 = 500;

/// Power-on chime: two rising notes separated by a short gap
pub const CHIME_LOW_HZ: u16 = 1000;
pub const CHIME_HIGH_HZ: u16 = 1500;
pub const CHIME_NOTE_MS: u16 = 200;
pub const CHIME_GAP_MS: u16 = 100;

/// ADC samples folded into the random seed
pub const SEED_SAMPLES: u8 = 32;
