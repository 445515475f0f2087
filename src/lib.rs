//! Reaction-time game for an ATmega328P board with five LEDs, a 7-segment
//! display, a buzzer and one button.
//!
//! Everything above `hal` is target independent and runs under `cargo test`
//! on the host; `hal` talks to the AVR registers and is only built for AVR.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod config;
pub mod drivers;
pub mod error;
pub mod game;
pub mod logger;
pub mod os;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use error::Error;
