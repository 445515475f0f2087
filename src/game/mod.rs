//! Game logic: difficulty selection, the round state machine and the loop
//! that drives it

pub mod difficulty;
pub mod round;
pub mod session;

pub use difficulty::{Difficulty, DifficultySelector, Session};
pub use round::{RoundController, RoundOutcome, State, Transition};
pub use session::run_session;
