use crate::os::fold_entropy;
use avr_device::atmega328p::ADC;

pub struct Adc {
    _private: (),
}

impl Adc {
    pub fn new() -> Self {
        unsafe {
            let p = &*ADC::ptr();
            // Reference = AVCC
            p.admux.write(|w| w.bits(0x40));
            // Enable ADC, prescaler div128 (125kHz @ 16MHz)
            p.adcsra.write(|w| w.bits(0x87));
        }
        Self { _private: () }
    }

    pub fn read_channel(&mut self, channel: u8) -> u16 {
        unsafe {
            let p = &*ADC::ptr();

            p.admux
                .modify(|r, w| w.bits((r.bits() & 0xF0) | (channel & 0x0F)));

            // Start conversion and wait for ADSC to clear
            p.adcsra.modify(|r, w| w.bits(r.bits() | 0x40));
            while p.adcsra.read().bits() & 0x40 != 0 {}

            p.adc.read().bits()
        }
    }

    /// Seed built from the noise on a floating input
    pub fn entropy_seed(&mut self, channel: u8, samples: u8) -> u32 {
        (0..samples).fold(0, |seed, _| fold_entropy(seed, self.read_channel(channel)))
    }

    /// Power the ADC down once the seed has been taken
    pub fn disable(self) {
        unsafe {
            (*ADC::ptr()).adcsra.write(|w| w.bits(0));
        }
    }
}

impl Default for Adc {
    fn default() -> Self {
        Self::new()
    }
}
