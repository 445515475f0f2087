use crate::config::{
    CHIME_GAP_MS, CHIME_HIGH_HZ, CHIME_LOW_HZ, CHIME_NOTE_MS, FAILURE_TONE_HZ, RESULT_TONE_MS,
    SUCCESS_TONE_HZ, TICK_TONE_HZ, TICK_TONE_MS,
};
use embedded_hal::blocking::delay::DelayMs;

/// A single square-wave cue
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    pub const TICK: Tone = Tone::new(TICK_TONE_HZ, TICK_TONE_MS);
    pub const SUCCESS: Tone = Tone::new(SUCCESS_TONE_HZ, RESULT_TONE_MS);
    pub const FAILURE: Tone = Tone::new(FAILURE_TONE_HZ, RESULT_TONE_MS);

    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }

    /// Pin toggles needed to play the whole tone (two per period)
    pub fn half_periods(&self) -> u32 {
        2 * u32::from(self.freq_hz) * u32::from(self.duration_ms) / 1000
    }
}

/// Starts a tone and returns immediately; the tone ends on its own
pub trait ToneGenerator {
    fn start(&mut self, tone: Tone);
    fn stop(&mut self);
}

/// Play a tone and wait until it has finished
pub fn play_blocking<T, D>(buzzer: &mut T, delay: &mut D, tone: Tone)
where
    T: ToneGenerator,
    D: DelayMs<u16>,
{
    buzzer.start(tone);
    delay.delay_ms(tone.duration_ms);
    buzzer.stop();
}

/// Two rising notes played once at power-on
pub fn startup_chime<T, D>(buzzer: &mut T, delay: &mut D)
where
    T: ToneGenerator,
    D: DelayMs<u16>,
{
    play_blocking(buzzer, delay, Tone::new(CHIME_LOW_HZ, CHIME_NOTE_MS));
    delay.delay_ms(CHIME_GAP_MS);
    play_blocking(buzzer, delay, Tone::new(CHIME_HIGH_HZ, CHIME_NOTE_MS));
}

/// 8-bit CTC timer configuration that toggles an output at twice the tone frequency
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToneTimer {
    /// Clock-select bits for the timer control register
    pub clock_select: u8,
    pub compare: u8,
}

// (clock-select bits, prescaler) available on Timer2
const TIMER2_PRESCALERS: [(u8, u32); 7] = [
    (1, 1),
    (2, 8),
    (3, 32),
    (4, 64),
    (5, 128),
    (6, 256),
    (7, 1024),
];

/// Smallest prescaler whose compare value fits in 8 bits
pub fn tone_timer(cpu_hz: u32, freq_hz: u16) -> Option<ToneTimer> {
    if freq_hz == 0 {
        return None;
    }
    let toggle_hz = 2 * u32::from(freq_hz);
    TIMER2_PRESCALERS.iter().find_map(|&(clock_select, prescaler)| {
        let ticks = cpu_hz / (prescaler * toggle_hz);
        if (1..=256).contains(&ticks) {
            Some(ToneTimer {
                clock_select,
                compare: (ticks - 1) as u8,
            })
        } else {
            None
        }
    })
}
