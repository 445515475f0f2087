use embedded_hal::digital::v2::OutputPin;

/// Row of discrete LEDs used for the chase animation
pub struct LedChase<P, const N: usize> {
    leds: [P; N],
}

impl<P: OutputPin, const N: usize> LedChase<P, N> {
    pub fn new(leds: [P; N]) -> Self {
        Self { leds }
    }

    /// Light exactly one LED, or none. Indices past the end turn everything off.
    pub fn light_only(&mut self, step: Option<usize>) -> Result<(), P::Error> {
        let step = step.filter(|&i| i < N);
        for (i, led) in self.leds.iter_mut().enumerate() {
            if step == Some(i) {
                led.set_high()?;
            } else {
                led.set_low()?;
            }
        }
        Ok(())
    }
}

/// Which LED the chase lights `elapsed_ms` into a sweep
pub fn chase_step(elapsed_ms: u32, dwell_ms: u32, leds: usize) -> usize {
    if dwell_ms == 0 || leds == 0 {
        return 0;
    }
    (elapsed_ms / dwell_ms) as usize % leds
}
