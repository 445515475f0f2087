use crate::config::CPU_FREQ_HZ;
use crate::os::{elapsed_ms, Clock};
use avr_device::atmega328p::TC0;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;
use embedded_hal::blocking::delay::DelayMs;

const PRESCALER: u32 = 64;
// 16MHz / 64 = 250kHz, 250 counts = 1ms
const TICKS_PER_MS: u32 = CPU_FREQ_HZ / PRESCALER / 1000;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Millisecond system clock driven by Timer0 compare match A
pub struct Millis {
    _private: (),
}

impl Millis {
    /// Start the 1ms tick. Interrupts must be enabled globally afterwards.
    pub fn start() -> Self {
        unsafe {
            let p = &*TC0::ptr();
            // CTC mode, top = OCR0A
            p.tccr0a.write(|w| w.bits(0x02));
            p.ocr0a.write(|w| w.bits((TICKS_PER_MS - 1) as u8));
            p.tcnt0.write(|w| w.bits(0));
            // clk/64
            p.tccr0b.write(|w| w.bits(0x03));
            // OCIE0A
            p.timsk0.write(|w| w.bits(0x02));
        }
        Self { _private: () }
    }

    pub fn delay(&self) -> Delay<'_> {
        Delay { clock: self }
    }
}

impl Clock for Millis {
    fn now_ms(&self) -> u32 {
        interrupt::free(|cs| MILLIS.borrow(cs).get())
    }
}

/// Busy-wait delay on top of the millisecond clock
pub struct Delay<'a> {
    clock: &'a Millis,
}

impl DelayMs<u16> for Delay<'_> {
    fn delay_ms(&mut self, ms: u16) {
        let start = self.clock.now_ms();
        while elapsed_ms(self.clock.now_ms(), start) < u32::from(ms) {}
    }
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    interrupt::free(|cs| {
        let millis = MILLIS.borrow(cs);
        millis.set(millis.get().wrapping_add(1));
    });
}
