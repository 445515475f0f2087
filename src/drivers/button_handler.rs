use crate::os::elapsed_ms;
use embedded_hal::digital::v2::InputPin;

/// What one sampling tick saw on the button
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    None,
    ShortPress,
    /// Press has lasted at least the hold threshold; carries the duration so far
    HeldFor(u32),
}

/// Single momentary button wired active low
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_pressed(&self) -> Result<bool, P::Error> {
        self.pin.is_low()
    }
}

/// Turns raw level samples into press and hold events
pub struct ButtonSampler {
    /// Level seen by the previous edge check; `None` until the first sample
    last_pressed: Option<bool>,
    /// When the current continuous press was first sampled
    hold_start: Option<u32>,
    /// Short presses are ignored until this much time has passed since the last one
    quiet_ms: u32,
    last_press_at: Option<u32>,
}

impl ButtonSampler {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            last_pressed: None,
            hold_start: None,
            quiet_ms,
            last_press_at: None,
        }
    }

    /// True only on the released -> pressed edge since the previous call.
    /// The first call only records the level, so a button held at power-on
    /// is not a press.
    pub fn detect_short_press(&mut self, pressed: bool) -> bool {
        let edge = self.last_pressed == Some(false) && pressed;
        self.last_pressed = Some(pressed);
        edge
    }

    /// True once the button has been down continuously for `threshold_ms`.
    /// Releasing forgets the press entirely.
    pub fn detect_held(&mut self, pressed: bool, now: u32, threshold_ms: u32) -> bool {
        if !pressed {
            self.hold_start = None;
            return false;
        }
        let start = *self.hold_start.get_or_insert(now);
        elapsed_ms(now, start) >= threshold_ms
    }

    /// One sampling tick. The edge detector is skipped during the quiet
    /// period that follows a short press, which absorbs contact bounce.
    pub fn sample(&mut self, pressed: bool, now: u32, hold_threshold_ms: u32) -> ButtonEvent {
        let quiet = self
            .last_press_at
            .map_or(false, |at| elapsed_ms(now, at) < self.quiet_ms);

        let short = !quiet && self.detect_short_press(pressed);
        if short {
            self.last_press_at = Some(now);
        }

        if self.detect_held(pressed, now, hold_threshold_ms) {
            let held = self.hold_start.map_or(hold_threshold_ms, |start| elapsed_ms(now, start));
            ButtonEvent::HeldFor(held)
        } else if short {
            ButtonEvent::ShortPress
        } else {
            ButtonEvent::None
        }
    }
}
