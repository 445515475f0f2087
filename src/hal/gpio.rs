use avr_device::atmega328p::{PORTB, PORTC, PORTD};
use avr_device::interrupt;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    B,
    C,
    D,
}

// Pick the same register on whichever port the pin lives on
macro_rules! port_reg {
    ($port:expr, $b:ident, $c:ident, $d:ident, |$r:ident| $body:expr) => {
        match $port {
            Port::B => {
                let $r = unsafe { &(*PORTB::ptr()).$b };
                $body
            }
            Port::C => {
                let $r = unsafe { &(*PORTC::ptr()).$c };
                $body
            }
            Port::D => {
                let $r = unsafe { &(*PORTD::ptr()).$d };
                $body
            }
        }
    };
}

#[inline]
fn apply(bits: u8, mask: u8, set: bool) -> u8 {
    if set {
        bits | mask
    } else {
        bits & !mask
    }
}

impl Port {
    fn set_direction(self, mask: u8, output: bool) {
        interrupt::free(|_| {
            port_reg!(self, ddrb, ddrc, ddrd, |r| r
                .modify(|v, w| unsafe { w.bits(apply(v.bits(), mask, output)) }))
        })
    }

    // The tone interrupt toggles a port C bit, so read-modify-write runs with interrupts off
    fn write(self, mask: u8, high: bool) {
        interrupt::free(|_| {
            port_reg!(self, portb, portc, portd, |r| r
                .modify(|v, w| unsafe { w.bits(apply(v.bits(), mask, high)) }))
        })
    }

    /// Writing a one to PINx flips the output latch in a single store
    pub(crate) fn toggle(self, mask: u8) {
        port_reg!(self, pinb, pinc, pind, |r| r.write(|w| unsafe { w.bits(mask) }))
    }

    fn read(self) -> u8 {
        port_reg!(self, pinb, pinc, pind, |r| r.read().bits())
    }
}

/// A single port pin addressed at runtime, so pins on different ports can share an array
#[derive(Debug)]
pub struct Pin<MODE> {
    port: Port,
    mask: u8,
    _mode: PhantomData<MODE>,
}

impl<MODE: PinMode> Pin<MODE> {
    pub fn port(&self) -> Port {
        self.port
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl Pin<Output> {
    /// Configure as output, driven low
    pub fn output(port: Port, bit: u8) -> Self {
        let mask = 1 << bit;
        port.write(mask, false);
        port.set_direction(mask, true);
        Self {
            port,
            mask,
            _mode: PhantomData,
        }
    }
}

impl Pin<Input> {
    /// Configure as input with the internal pull-up enabled
    pub fn input_pull_up(port: Port, bit: u8) -> Self {
        let mask = 1 << bit;
        port.set_direction(mask, false);
        port.write(mask, true);
        Self {
            port,
            mask,
            _mode: PhantomData,
        }
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.port.write(self.mask, false);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.port.write(self.mask, true);
        Ok(())
    }
}

impl InputPin for Pin<Input> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.port.read() & self.mask != 0)
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(self.port.read() & self.mask == 0)
    }
}

// Arduino Uno pin map for the game board
pub mod board {
    use super::*;
    use crate::config::LED_COUNT;

    /// Segments a..g on D6..D12
    pub fn segments() -> [Pin<Output>; 7] {
        [
            Pin::output(Port::D, 6),
            Pin::output(Port::D, 7),
            Pin::output(Port::B, 0),
            Pin::output(Port::B, 1),
            Pin::output(Port::B, 2),
            Pin::output(Port::B, 3),
            Pin::output(Port::B, 4),
        ]
    }

    /// Chase LEDs on D2..D5 and A2. D0/D1 stay free for the debug console.
    pub fn leds() -> [Pin<Output>; LED_COUNT] {
        [
            Pin::output(Port::D, 2),
            Pin::output(Port::D, 3),
            Pin::output(Port::D, 4),
            Pin::output(Port::D, 5),
            Pin::output(Port::C, 2),
        ]
    }

    /// Buzzer on A0
    pub fn buzzer() -> Pin<Output> {
        Pin::output(Port::C, 0)
    }

    /// Push-button on A1 to ground
    pub fn button() -> Pin<Input> {
        Pin::input_pull_up(Port::C, 1)
    }

    /// Unconnected ADC input used as a noise source
    pub const NOISE_CHANNEL: u8 = 5;
}
