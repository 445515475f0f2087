use super::buzzer::{Tone, ToneGenerator};
use super::led_chase::LedChase;
use super::seven_segment::{Glyph, SevenSegment};
use crate::error::Error;
use embedded_hal::digital::v2::OutputPin;

/// Everything the game can show or sound
pub trait Outputs {
    type Error;

    fn show_glyph(&mut self, glyph: Glyph) -> Result<(), Self::Error>;

    fn play_tone(&mut self, tone: Tone) -> Result<(), Self::Error>;

    /// Light only the LED at `step`; `None` turns the row off
    fn light_chase(&mut self, step: Option<usize>) -> Result<(), Self::Error>;
}

/// Display, LED row and buzzer wired to one board
pub struct OutputDriver<P, T, const N: usize> {
    display: SevenSegment<P>,
    leds: LedChase<P, N>,
    buzzer: T,
}

impl<P, T, const N: usize> OutputDriver<P, T, N>
where
    P: OutputPin,
    T: ToneGenerator,
{
    pub fn new(display: SevenSegment<P>, leds: LedChase<P, N>, buzzer: T) -> Self {
        Self {
            display,
            leds,
            buzzer,
        }
    }

    pub fn buzzer(&mut self) -> &mut T {
        &mut self.buzzer
    }
}

impl<P, T, const N: usize> Outputs for OutputDriver<P, T, N>
where
    P: OutputPin,
    T: ToneGenerator,
{
    type Error = Error<P::Error>;

    fn show_glyph(&mut self, glyph: Glyph) -> Result<(), Self::Error> {
        self.display.show(glyph).map_err(Error::Display)
    }

    fn play_tone(&mut self, tone: Tone) -> Result<(), Self::Error> {
        self.buzzer.start(tone);
        Ok(())
    }

    fn light_chase(&mut self, step: Option<usize>) -> Result<(), Self::Error> {
        self.leds.light_only(step).map_err(Error::Lights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct PinFault;

    /// Output pin that can be unplugged
    #[derive(Clone, Copy)]
    struct TestPin {
        broken: bool,
    }

    impl OutputPin for TestPin {
        type Error = PinFault;

        fn set_low(&mut self) -> Result<(), PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            Ok(())
        }
    }

    struct SilentBuzzer(Vec<Tone>);

    impl ToneGenerator for SilentBuzzer {
        fn start(&mut self, tone: Tone) {
            self.0.push(tone);
        }

        fn stop(&mut self) {}
    }

    fn pins<const K: usize>(broken: bool) -> [TestPin; K] {
        [TestPin { broken }; K]
    }

    #[test]
    fn led_failure_is_reported_as_lights_error() {
        let mut out = OutputDriver::new(
            SevenSegment::new(pins::<7>(false)),
            LedChase::new(pins::<5>(true)),
            SilentBuzzer(Vec::new()),
        );
        assert_eq!(out.light_chase(Some(0)), Err(Error::Lights(PinFault)));
        assert_eq!(out.show_glyph(Glyph::E), Ok(()));
    }

    #[test]
    fn display_failure_is_reported_as_display_error() {
        let mut out = OutputDriver::new(
            SevenSegment::new(pins::<7>(true)),
            LedChase::new(pins::<5>(false)),
            SilentBuzzer(Vec::new()),
        );
        assert_eq!(out.show_glyph(Glyph::S), Err(Error::Display(PinFault)));
    }

    #[test]
    fn tones_go_to_the_buzzer() {
        let mut out = OutputDriver::new(
            SevenSegment::new(pins::<7>(false)),
            LedChase::new(pins::<5>(false)),
            SilentBuzzer(Vec::new()),
        );
        out.play_tone(Tone::SUCCESS).unwrap();
        assert_eq!(out.buzzer().0, [Tone::SUCCESS]);
    }
}
