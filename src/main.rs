#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use reaction_game::config::{SEED_SAMPLES, UART_BAUD};
    use reaction_game::drivers::{
        startup_chime, Button, LedChase, OutputDriver, SerialConsole, SevenSegment,
    };
    use reaction_game::game::{run_session, RoundController};
    use reaction_game::hal::{board, Adc, Buzzer, Millis, Power, Uart};
    use reaction_game::logger::Logger;
    use reaction_game::os::{Clock, XorShift32};

    #[avr_device::entry]
    fn main() -> ! {
        let clock = Millis::start();
        let mut outputs = OutputDriver::new(
            SevenSegment::new(board::segments()),
            LedChase::new(board::leds()),
            Buzzer::new(board::buzzer()),
        );
        let button = Button::new(board::button());
        let mut log = Logger::new(SerialConsole::new(Uart::new(UART_BAUD)));

        // Enable interrupts globally
        unsafe { avr_device::interrupt::enable() };

        log.log_system(clock.now_ms(), "reaction game v0.1.0").ok();
        startup_chime(outputs.buzzer(), &mut clock.delay());

        let mut adc = Adc::new();
        let seed = adc.entropy_seed(board::NOISE_CHANNEL, SEED_SAMPLES);
        adc.disable();
        log.log_debug(clock.now_ms(), "random source seeded from adc noise").ok();

        let mut game = RoundController::new(XorShift32::new(seed));
        if let Err(err) = run_session(&clock, &mut game, &mut outputs, &button, &mut log) {
            log.log_error(clock.now_ms(), err.source_name()).ok();
        }

        // Result stays on the display until power is cycled
        log.into_inner().flush().ok();
        let mut power = Power::new();
        loop {
            power.enter_idle_mode();
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("reaction_game runs on the ATmega328P; use `cargo test` for the game logic on the host");
}
