//! Round state machine
//!
//! `RoundController::tick` is called from a single control loop with the
//! current time and the latest button sample. Each state's work is a pure
//! step function of the time spent in that state, so the whole game can be
//! driven by a fake clock and a scripted button.

use super::difficulty::{Difficulty, DifficultySelector, Session};
use crate::config::{
    CHASE_DWELL_MS, COUNTDOWN_FROM, HOLD_TO_START_MS, LED_COUNT, PRESS_QUIET_MS,
    RANDOM_DELAY_MAX_MS, RANDOM_DELAY_MIN_MS, SECOND_MS,
};
use crate::drivers::led_chase::chase_step;
use crate::drivers::{ButtonEvent, ButtonSampler, Glyph, Outputs, Tone};
use crate::os::{elapsed_ms, RandomSource};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    SelectingDifficulty,
    Countdown,
    RandomDelay,
    ReactionWindow,
    Success,
    Failure,
    /// Terminal; nothing changes until power is cycled
    Halted,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::SelectingDifficulty => "selecting",
            State::Countdown => "countdown",
            State::RandomDelay => "random-delay",
            State::ReactionWindow => "reaction-window",
            State::Success => "success",
            State::Failure => "failure",
            State::Halted => "halted",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Success,
    Failure,
}

impl RoundOutcome {
    pub fn glyph(self) -> Glyph {
        match self {
            RoundOutcome::Success => Glyph::S,
            RoundOutcome::Failure => Glyph::L,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            RoundOutcome::Success => Tone::SUCCESS,
            RoundOutcome::Failure => Tone::FAILURE,
        }
    }
}

/// One state change made during a tick, stamped with when it took effect
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: State,
    pub to: State,
    pub at: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    Show(u8),
    Done,
}

/// Digit on display `elapsed_ms` into the countdown
pub fn countdown_step(elapsed_ms: u32) -> CountdownStep {
    let whole = elapsed_ms / SECOND_MS;
    if whole >= u32::from(COUNTDOWN_FROM) {
        CountdownStep::Done
    } else {
        CountdownStep::Show(COUNTDOWN_FROM - whole as u8)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReactionStep {
    Pressed,
    TimedOut,
    Running { remaining_secs: u8, led: usize },
}

/// The window is half-open: a press at `window_ms` is already too late
pub fn reaction_step(elapsed_ms: u32, window_ms: u32, pressed: bool) -> ReactionStep {
    if elapsed_ms >= window_ms {
        return ReactionStep::TimedOut;
    }
    if pressed {
        return ReactionStep::Pressed;
    }
    let left = window_ms - elapsed_ms;
    let remaining_secs = ((left + SECOND_MS - 1) / SECOND_MS).min(9) as u8;
    let led = chase_step(elapsed_ms % SECOND_MS, CHASE_DWELL_MS, LED_COUNT);
    ReactionStep::Running {
        remaining_secs,
        led,
    }
}

/// Owns every piece of mutable game state for one power-on session
pub struct RoundController<R> {
    state: State,
    session: Session,
    sampler: ButtonSampler,
    selector: DifficultySelector,
    rng: R,
    /// When the current state began
    entered_at: u32,
    delay_ms: Option<u32>,
    shown: Option<u8>,
    led: Option<usize>,
    outcome: Option<RoundOutcome>,
    reaction_ms: Option<u32>,
    /// Changes made by the latest tick; opening the window can finish the round in the same tick
    trail: [Option<Transition>; 2],
}

impl<R: RandomSource> RoundController<R> {
    pub fn new(rng: R) -> Self {
        Self::with_difficulty(rng, Difficulty::default())
    }

    pub fn with_difficulty(rng: R, initial: Difficulty) -> Self {
        Self {
            state: State::SelectingDifficulty,
            session: Session::PreGame,
            sampler: ButtonSampler::new(PRESS_QUIET_MS),
            selector: DifficultySelector::new(initial),
            rng,
            entered_at: 0,
            delay_ms: None,
            shown: None,
            led: None,
            outcome: None,
            reaction_ms: None,
            trail: [None; 2],
        }
    }

    /// Power-on display: LEDs dark, current difficulty on the segments
    pub fn begin<O: Outputs>(&mut self, out: &mut O) -> Result<(), O::Error> {
        out.light_chase(None)?;
        self.selector.show(out)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.selector.current()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Time from window opening to the winning press
    pub fn reaction_ms(&self) -> Option<u32> {
        self.reaction_ms
    }

    pub fn random_delay_ms(&self) -> Option<u32> {
        self.delay_ms
    }

    /// State changes made by the latest `tick`, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.trail.iter().flatten().copied()
    }

    /// Advance the game to `now` given the latest button level
    pub fn tick<O: Outputs>(&mut self, now: u32, pressed: bool, out: &mut O) -> Result<State, O::Error> {
        self.trail = [None; 2];
        match self.state {
            State::SelectingDifficulty => self.select(now, pressed, out)?,
            State::Countdown => self.count_down(now, out)?,
            State::RandomDelay => self.wait(now, pressed, out)?,
            State::ReactionWindow => self.react(now, pressed, out)?,
            State::Success | State::Failure => self.enter(State::Halted, now),
            State::Halted => {}
        }
        Ok(self.state)
    }

    fn enter(&mut self, state: State, at: u32) {
        let step = Transition {
            from: self.state,
            to: state,
            at,
        };
        if let Some(slot) = self.trail.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(step);
        }
        self.state = state;
        self.entered_at = at;
        self.shown = None;
        self.led = None;
    }

    fn select<O: Outputs>(&mut self, now: u32, pressed: bool, out: &mut O) -> Result<(), O::Error> {
        match self.sampler.sample(pressed, now, HOLD_TO_START_MS) {
            ButtonEvent::ShortPress => {
                self.selector.advance(self.session, out)?;
            }
            ButtonEvent::HeldFor(_) => {
                self.session = Session::InGame;
                self.enter(State::Countdown, now);
                self.count_down(now, out)?;
            }
            ButtonEvent::None => {}
        }
        Ok(())
    }

    fn count_down<O: Outputs>(&mut self, now: u32, out: &mut O) -> Result<(), O::Error> {
        match countdown_step(elapsed_ms(now, self.entered_at)) {
            CountdownStep::Show(digit) => {
                if self.shown != Some(digit) {
                    out.show_glyph(Glyph::Digit(digit))?;
                    out.play_tone(Tone::TICK)?;
                    self.shown = Some(digit);
                }
            }
            CountdownStep::Done => {
                let delay = self.rng.in_range(RANDOM_DELAY_MIN_MS, RANDOM_DELAY_MAX_MS);
                self.delay_ms = Some(delay);
                let ended = self
                    .entered_at
                    .wrapping_add(u32::from(COUNTDOWN_FROM) * SECOND_MS);
                self.enter(State::RandomDelay, ended);
            }
        }
        Ok(())
    }

    fn wait<O: Outputs>(&mut self, now: u32, pressed: bool, out: &mut O) -> Result<(), O::Error> {
        let delay = self.delay_ms.unwrap_or(RANDOM_DELAY_MIN_MS);
        if elapsed_ms(now, self.entered_at) >= delay {
            let opened = self.entered_at.wrapping_add(delay);
            self.enter(State::ReactionWindow, opened);
            // the window is open from this very tick
            self.react(now, pressed, out)?;
        }
        Ok(())
    }

    fn react<O: Outputs>(&mut self, now: u32, pressed: bool, out: &mut O) -> Result<(), O::Error> {
        let elapsed = elapsed_ms(now, self.entered_at);
        match reaction_step(elapsed, self.difficulty().window_ms(), pressed) {
            ReactionStep::Pressed => {
                self.reaction_ms = Some(elapsed);
                self.finish(RoundOutcome::Success, now, out)
            }
            ReactionStep::TimedOut => self.finish(RoundOutcome::Failure, now, out),
            ReactionStep::Running {
                remaining_secs,
                led,
            } => {
                if self.shown != Some(remaining_secs) {
                    out.show_glyph(Glyph::Digit(remaining_secs))?;
                    out.play_tone(Tone::TICK)?;
                    self.shown = Some(remaining_secs);
                }
                if self.led != Some(led) {
                    out.light_chase(Some(led))?;
                    self.led = Some(led);
                }
                Ok(())
            }
        }
    }

    fn finish<O: Outputs>(&mut self, outcome: RoundOutcome, now: u32, out: &mut O) -> Result<(), O::Error> {
        out.light_chase(None)?;
        out.show_glyph(outcome.glyph())?;
        out.play_tone(outcome.tone())?;
        self.outcome = Some(outcome);
        let state = match outcome {
            RoundOutcome::Success => State::Success,
            RoundOutcome::Failure => State::Failure,
        };
        self.enter(state, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Always returns the same raw value
    struct FixedRng(u32);

    impl RandomSource for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Glyph(Glyph),
        Tone(Tone),
        Led(Option<usize>),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl Recorder {
        fn glyphs(&self) -> Vec<Glyph> {
            self.0
                .iter()
                .filter_map(|e| match e {
                    Event::Glyph(g) => Some(*g),
                    _ => None,
                })
                .collect()
        }
    }

    impl Outputs for Recorder {
        type Error = Infallible;

        fn show_glyph(&mut self, glyph: Glyph) -> Result<(), Infallible> {
            self.0.push(Event::Glyph(glyph));
            Ok(())
        }

        fn play_tone(&mut self, tone: Tone) -> Result<(), Infallible> {
            self.0.push(Event::Tone(tone));
            Ok(())
        }

        fn light_chase(&mut self, step: Option<usize>) -> Result<(), Infallible> {
            self.0.push(Event::Led(step));
            Ok(())
        }
    }

    /// Hold from `t0` until the game starts; returns the start time
    fn hold_to_start<R: RandomSource>(game: &mut RoundController<R>, out: &mut Recorder, t0: u32) -> u32 {
        game.tick(t0, false, out).unwrap();
        let mut now = t0;
        loop {
            now = now.wrapping_add(1);
            if game.tick(now, true, out).unwrap() == State::Countdown {
                return now;
            }
        }
    }

    #[test]
    fn countdown_steps() {
        assert_eq!(countdown_step(0), CountdownStep::Show(3));
        assert_eq!(countdown_step(999), CountdownStep::Show(3));
        assert_eq!(countdown_step(1000), CountdownStep::Show(2));
        assert_eq!(countdown_step(2999), CountdownStep::Show(1));
        assert_eq!(countdown_step(3000), CountdownStep::Done);
    }

    #[test]
    fn reaction_window_is_half_open() {
        assert_eq!(reaction_step(0, 3000, true), ReactionStep::Pressed);
        assert_eq!(reaction_step(2999, 3000, true), ReactionStep::Pressed);
        assert_eq!(reaction_step(3000, 3000, true), ReactionStep::TimedOut);
        assert_eq!(reaction_step(3000, 3000, false), ReactionStep::TimedOut);
    }

    #[test]
    fn reaction_display_counts_down_whole_seconds() {
        assert_eq!(
            reaction_step(0, 7000, false),
            ReactionStep::Running { remaining_secs: 7, led: 0 }
        );
        assert_eq!(
            reaction_step(1450, 7000, false),
            ReactionStep::Running { remaining_secs: 6, led: 2 }
        );
        assert_eq!(
            reaction_step(6999, 7000, false),
            ReactionStep::Running { remaining_secs: 1, led: 4 }
        );
    }

    #[test]
    fn hold_starts_countdown_at_three() {
        let mut game = RoundController::new(FixedRng(0));
        let mut out = Recorder::default();
        game.begin(&mut out).unwrap();

        let started = hold_to_start(&mut game, &mut out, 100);
        // the press edge at 101 also cycles the difficulty once
        assert_eq!(started, 101 + HOLD_TO_START_MS);
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert_eq!(game.session(), Session::InGame);
        assert_eq!(
            out.0[out.0.len() - 2..],
            [Event::Glyph(Glyph::Digit(3)), Event::Tone(Tone::TICK)]
        );
    }

    #[test]
    fn difficulty_ignores_presses_after_start() {
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        let frozen = game.difficulty();

        // hammer the button through the countdown
        for t in 1..=3000 {
            game.tick(started + t, t % 300 < 150, &mut out).unwrap();
        }
        assert_eq!(game.difficulty(), frozen);
        assert_eq!(game.state(), State::RandomDelay);
    }

    #[test]
    fn random_delay_uses_rng_range() {
        let mut game = RoundController::new(FixedRng(u32::MAX));
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);

        game.tick(started + 3000, false, &mut out).unwrap();
        let delay = game.random_delay_ms().unwrap();
        assert_eq!(delay, 2000 + u32::MAX % 3000);
        assert!((2000..5000).contains(&delay));
    }

    #[test]
    fn press_during_random_delay_is_ignored() {
        let mut game = RoundController::with_difficulty(FixedRng(500), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        let delay_start = started + 3000;
        game.tick(delay_start, false, &mut out).unwrap();
        assert_eq!(game.random_delay_ms(), Some(2500));

        for t in 0..2500 {
            assert_eq!(game.tick(delay_start + t, true, &mut out).unwrap(), State::RandomDelay);
        }
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn press_at_window_open_wins() {
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        game.tick(started + 3000, false, &mut out).unwrap();

        let opens = started + 3000 + 2000;
        assert_eq!(game.tick(opens, true, &mut out).unwrap(), State::Success);
        assert_eq!(game.reaction_ms(), Some(0));
        assert_eq!(game.tick(opens + 1, false, &mut out).unwrap(), State::Halted);
    }

    #[test]
    fn window_shows_seconds_and_chases_leds() {
        // medium start + one press cycle = hard
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        assert_eq!(game.difficulty(), Difficulty::Hard);
        game.tick(started + 3000, false, &mut out).unwrap();

        let opens = started + 5000;
        out.0.clear();
        for t in 0..=3000 {
            game.tick(opens + t, false, &mut out).unwrap();
        }

        assert_eq!(game.outcome(), Some(RoundOutcome::Failure));
        assert_eq!(
            out.glyphs(),
            [Glyph::Digit(3), Glyph::Digit(2), Glyph::Digit(1), Glyph::L]
        );
        let leds: Vec<Option<usize>> = out
            .0
            .iter()
            .filter_map(|e| match e {
                Event::Led(step) => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(leds.len(), 3 * 5 + 1);
        assert_eq!(leds[..5], [Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(leds.last(), Some(&None));
        let ticks = out.0.iter().filter(|e| **e == Event::Tone(Tone::TICK)).count();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn halted_is_terminal() {
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        game.tick(started + 3000, false, &mut out).unwrap();
        game.tick(started + 5000 + 10, true, &mut out).unwrap();
        game.tick(started + 5011, false, &mut out).unwrap();
        assert_eq!(game.state(), State::Halted);

        out.0.clear();
        for t in 0..5000 {
            assert_eq!(game.tick(started + 6000 + t, t % 2 == 0, &mut out).unwrap(), State::Halted);
        }
        assert!(out.0.is_empty());
        assert_eq!(game.outcome(), Some(RoundOutcome::Success));
        assert_eq!(game.reaction_ms(), Some(10));
    }

    #[test]
    fn late_tick_after_window_is_a_failure() {
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        game.tick(started + 3000, false, &mut out).unwrap();

        // the loop stalls past the whole delay plus window
        let late = started + 3000 + 2000 + 3000;
        let state = game.tick(late, true, &mut out).unwrap();
        assert_eq!(state, State::Failure);
        assert_eq!(game.reaction_ms(), None);

        let steps: Vec<Transition> = game.transitions().collect();
        assert_eq!(
            steps,
            [
                Transition {
                    from: State::RandomDelay,
                    to: State::ReactionWindow,
                    at: started + 5000,
                },
                Transition {
                    from: State::ReactionWindow,
                    to: State::Failure,
                    at: late,
                },
            ]
        );
    }

    #[test]
    fn tick_reports_only_its_own_changes() {
        let mut game = RoundController::with_difficulty(FixedRng(0), Difficulty::Medium);
        let mut out = Recorder::default();
        let started = hold_to_start(&mut game, &mut out, 0);
        assert_eq!(
            game.transitions().collect::<Vec<_>>(),
            [Transition {
                from: State::SelectingDifficulty,
                to: State::Countdown,
                at: started,
            }]
        );

        game.tick(started + 1, false, &mut out).unwrap();
        assert_eq!(game.transitions().count(), 0);
    }
}
