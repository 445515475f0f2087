//! Square-wave tones on the buzzer pin
//!
//! Timer2 runs in CTC mode and its compare interrupt flips the buzzer pin,
//! counting down the half-periods left in the current tone. The game loop
//! never waits for a tone to finish.

use super::gpio::{Output, Pin, Port};
use crate::config::CPU_FREQ_HZ;
use crate::drivers::buzzer::{tone_timer, Tone, ToneGenerator};
use avr_device::atmega328p::TC2;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;
use embedded_hal::digital::v2::OutputPin;

struct Playing {
    port: Port,
    mask: u8,
    half_periods: u32,
}

static PLAYING: Mutex<Cell<Option<Playing>>> = Mutex::new(Cell::new(None));

pub struct Buzzer {
    pin: Pin<Output>,
}

impl Buzzer {
    pub fn new(pin: Pin<Output>) -> Self {
        unsafe {
            (*TC2::ptr()).timsk2.write(|w| w.bits(0));
        }
        Self { pin }
    }
}

fn stop_timer() {
    unsafe {
        let p = &*TC2::ptr();
        p.timsk2.write(|w| w.bits(0));
        p.tccr2b.write(|w| w.bits(0));
    }
}

impl ToneGenerator for Buzzer {
    fn start(&mut self, tone: Tone) {
        self.stop();
        let Some(settings) = tone_timer(CPU_FREQ_HZ, tone.freq_hz) else {
            return;
        };
        interrupt::free(|cs| {
            PLAYING.borrow(cs).set(Some(Playing {
                port: self.pin.port(),
                mask: self.pin.mask(),
                half_periods: tone.half_periods(),
            }));
            unsafe {
                let p = &*TC2::ptr();
                // CTC mode, top = OCR2A
                p.tccr2a.write(|w| w.bits(0x02));
                p.ocr2a.write(|w| w.bits(settings.compare));
                p.tcnt2.write(|w| w.bits(0));
                p.tccr2b.write(|w| w.bits(settings.clock_select));
                // OCIE2A
                p.timsk2.write(|w| w.bits(0x02));
            }
        });
    }

    fn stop(&mut self) {
        interrupt::free(|cs| {
            stop_timer();
            PLAYING.borrow(cs).set(None);
        });
        self.pin.set_low().ok();
    }
}

#[avr_device::interrupt(atmega328p)]
fn TIMER2_COMPA() {
    interrupt::free(|cs| {
        let playing = PLAYING.borrow(cs);
        match playing.take() {
            Some(Playing { half_periods: 0, .. }) | None => stop_timer(),
            Some(mut tone) => {
                tone.port.toggle(tone.mask);
                tone.half_periods -= 1;
                playing.set(Some(tone));
            }
        }
    });
}
