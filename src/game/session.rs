use super::round::{RoundController, RoundOutcome, State, Transition};
use crate::drivers::{Button, Outputs};
use crate::error::Error;
use crate::logger::Logger;
use crate::os::{Clock, RandomSource};
use embedded_hal::digital::v2::InputPin;
use ufmt::uWrite;

/// Play one game from power-on to the halted result screen.
///
/// Each pass reads the clock, samples the button and ticks the controller.
/// State changes are logged; log write failures are ignored. The console
/// blocks while it sends, so nothing is written while the reaction window is
/// open: the window's entry is held back and written once the round is over.
pub fn run_session<C, O, P, R, W, E>(
    clock: &C,
    game: &mut RoundController<R>,
    out: &mut O,
    button: &Button<P>,
    log: &mut Logger<W>,
) -> Result<RoundOutcome, Error<E>>
where
    C: Clock,
    O: Outputs<Error = Error<E>>,
    P: InputPin<Error = E>,
    R: RandomSource,
    W: uWrite,
{
    game.begin(out)?;
    log.log_game(clock.now_ms(), "hold the button to start").ok();

    let mut held_back: Option<Transition> = None;
    loop {
        let now = clock.now_ms();
        let pressed = button.is_pressed().map_err(Error::Button)?;
        let state = game.tick(now, pressed, out)?;

        if state == State::ReactionWindow {
            if let Some(step) = game.transitions().last() {
                held_back = Some(step);
            }
            continue;
        }

        for step in held_back.take().into_iter().chain(game.transitions()) {
            log_transition(log, game, step);
        }

        if state == State::Halted {
            if let Some(outcome) = game.outcome() {
                return Ok(outcome);
            }
        }
    }
}

fn log_transition<R, W>(log: &mut Logger<W>, game: &RoundController<R>, step: Transition)
where
    R: RandomSource,
    W: uWrite,
{
    log.transition(step.at, step.from, step.to).ok();
    match step.to {
        State::Countdown => {
            log.difficulty(step.at, game.difficulty()).ok();
        }
        State::RandomDelay => {
            if let Some(delay) = game.random_delay_ms() {
                log.random_delay(step.at, delay).ok();
            }
        }
        State::Success | State::Failure => {
            if let Some(outcome) = game.outcome() {
                log.outcome(step.at, outcome, game.reaction_ms()).ok();
            }
        }
        State::SelectingDifficulty | State::ReactionWindow | State::Halted => {}
    }
}
