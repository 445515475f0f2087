use avr_device::atmega328p::CPU;

// SMCR: sleep enable, and SM2..0 where all zero selects idle
const SE: u8 = 0x01;
const SM_MASK: u8 = 0x0E;

pub struct Power {
    _private: (),
}

impl Power {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Sleep until the next interrupt. Timers keep running, so a tone that
    /// is still playing finishes normally.
    pub fn enter_idle_mode(&mut self) {
        unsafe {
            let p = &*CPU::ptr();
            p.smcr.modify(|r, w| w.bits((r.bits() & !SM_MASK) | SE));
            avr_device::asm::sleep();
            p.smcr.modify(|r, w| w.bits(r.bits() & !SE));
        }
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::new()
    }
}
