use crate::config::CPU_FREQ_HZ;
use avr_device::atmega328p::USART0;
use core::convert::Infallible;
use embedded_hal::serial::Write;

const UDRE0: u8 = 1 << 5;
const TXC0: u8 = 1 << 6;

/// Transmit-only USART0 on D1, polled
pub struct Uart {
    _private: (),
}

impl Uart {
    pub fn new(baud: u32) -> Self {
        unsafe {
            let p = &*USART0::ptr();
            p.ubrr0.write(|w| w.bits(ubrr_for(CPU_FREQ_HZ, baud)));
            // 8N1
            p.ucsr0c.write(|w| w.bits(0x06));
            // TXEN0
            p.ucsr0b.write(|w| w.bits(0x08));
        }
        Self { _private: () }
    }

    fn status(&self) -> u8 {
        unsafe { (*USART0::ptr()).ucsr0a.read().bits() }
    }
}

// (16_000_000 / (16 * 9600)) - 1 = 103
const fn ubrr_for(cpu_hz: u32, baud: u32) -> u16 {
    (cpu_hz / (16 * baud) - 1) as u16
}

impl Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.status() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        unsafe {
            let p = &*USART0::ptr();
            // clear TXC0 so flush can tell when this byte has left
            p.ucsr0a.modify(|r, w| w.bits(r.bits() | TXC0));
            p.udr0.write(|w| w.bits(byte));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.status() & UDRE0 == 0 || self.status() & TXC0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        Ok(())
    }
}
