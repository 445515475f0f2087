//! Timestamped event log written to the debug console
//!
//! Lines look like `[12034] GAME countdown -> random-delay`. Write failures are
//! returned to the caller, which is free to ignore them; the game never
//! depends on the log.

use crate::game::{Difficulty, RoundOutcome, State};
use ufmt::{uWrite, uwrite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    System,
    Game,
    Error,
    /// Only written when built with the `debug` feature
    Debug,
}

impl LogType {
    fn tag(self) -> &'static str {
        match self {
            LogType::System => "SYS",
            LogType::Game => "GAME",
            LogType::Error => "ERR",
            LogType::Debug => "DBG",
        }
    }

    fn enabled(self) -> bool {
        self != LogType::Debug || cfg!(feature = "debug")
    }
}

pub struct Logger<W> {
    writer: W,
}

impl<W: uWrite> Logger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn log_system(&mut self, timestamp: u32, msg: &str) -> Result<(), W::Error> {
        self.log_entry(timestamp, LogType::System, msg)
    }

    pub fn log_game(&mut self, timestamp: u32, msg: &str) -> Result<(), W::Error> {
        self.log_entry(timestamp, LogType::Game, msg)
    }

    pub fn log_error(&mut self, timestamp: u32, msg: &str) -> Result<(), W::Error> {
        self.log_entry(timestamp, LogType::Error, msg)
    }

    pub fn log_debug(&mut self, timestamp: u32, msg: &str) -> Result<(), W::Error> {
        self.log_entry(timestamp, LogType::Debug, msg)
    }

    pub fn transition(&mut self, timestamp: u32, from: State, to: State) -> Result<(), W::Error> {
        self.header(timestamp, LogType::Game)?;
        uwrite!(&mut self.writer, "{} -> {}\r\n", from.name(), to.name())
    }

    pub fn difficulty(&mut self, timestamp: u32, difficulty: Difficulty) -> Result<(), W::Error> {
        self.header(timestamp, LogType::Game)?;
        uwrite!(
            &mut self.writer,
            "difficulty {} window {} ms\r\n",
            difficulty.name(),
            difficulty.window_ms()
        )
    }

    pub fn random_delay(&mut self, timestamp: u32, delay_ms: u32) -> Result<(), W::Error> {
        if !LogType::Debug.enabled() {
            return Ok(());
        }
        self.header(timestamp, LogType::Debug)?;
        uwrite!(&mut self.writer, "random delay {} ms\r\n", delay_ms)
    }

    pub fn outcome(
        &mut self,
        timestamp: u32,
        outcome: RoundOutcome,
        reaction_ms: Option<u32>,
    ) -> Result<(), W::Error> {
        self.header(timestamp, LogType::Game)?;
        match (outcome, reaction_ms) {
            (RoundOutcome::Success, Some(ms)) => {
                uwrite!(&mut self.writer, "success after {} ms\r\n", ms)
            }
            (RoundOutcome::Success, None) => uwrite!(&mut self.writer, "success\r\n"),
            (RoundOutcome::Failure, _) => uwrite!(&mut self.writer, "failure, too slow\r\n"),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn log_entry(&mut self, timestamp: u32, log_type: LogType, msg: &str) -> Result<(), W::Error> {
        if !log_type.enabled() {
            return Ok(());
        }
        self.header(timestamp, log_type)?;
        uwrite!(&mut self.writer, "{}\r\n", msg)
    }

    fn header(&mut self, timestamp: u32, log_type: LogType) -> Result<(), W::Error> {
        uwrite!(&mut self.writer, "[{}] {} ", timestamp, log_type.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Capture(String);

    impl uWrite for Capture {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    fn capture() -> Logger<Capture> {
        Logger::new(Capture::default())
    }

    #[test]
    fn system_line_format() {
        let mut log = capture();
        log.log_system(0, "reaction game ready").unwrap();
        assert_eq!(log.into_inner().0, "[0] SYS reaction game ready\r\n");
    }

    #[test]
    fn transitions_use_state_names() {
        let mut log = capture();
        log.transition(4200, State::Countdown, State::RandomDelay).unwrap();
        assert_eq!(log.into_inner().0, "[4200] GAME countdown -> random-delay\r\n");
    }

    #[test]
    fn outcome_reports_reaction_time() {
        let mut log = capture();
        log.outcome(9000, RoundOutcome::Success, Some(1200)).unwrap();
        log.outcome(9500, RoundOutcome::Failure, None).unwrap();
        assert_eq!(
            log.into_inner().0,
            "[9000] GAME success after 1200 ms\r\n[9500] GAME failure, too slow\r\n"
        );
    }

    #[test]
    fn difficulty_line_includes_window() {
        let mut log = capture();
        log.difficulty(3001, Difficulty::Hard).unwrap();
        assert_eq!(log.into_inner().0, "[3001] GAME difficulty hard window 3000 ms\r\n");
    }

    #[test]
    fn debug_lines_follow_feature() {
        let mut log = capture();
        log.log_debug(5, "tick").unwrap();
        let text = log.into_inner().0;
        if cfg!(feature = "debug") {
            assert_eq!(text, "[5] DBG tick\r\n");
        } else {
            assert!(text.is_empty());
        }
    }
}
