use crate::drivers::{Glyph, Outputs};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Next level in cyclic order; Hard wraps to Easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Difficulty::Easy => Glyph::E,
            Difficulty::Medium => Glyph::I,
            Difficulty::Hard => Glyph::H,
        }
    }

    /// How long the player has to react
    pub fn window_ms(self) -> u32 {
        match self {
            Difficulty::Easy => 7000,
            Difficulty::Medium => 5000,
            Difficulty::Hard => 3000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

/// Whether difficulty may still change. Never goes back to `PreGame`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Session {
    PreGame,
    InGame,
}

pub struct DifficultySelector {
    current: Difficulty,
}

impl DifficultySelector {
    pub fn new(initial: Difficulty) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Difficulty {
        self.current
    }

    /// Step to the next level and show it. Does nothing once the game is
    /// running; returns whether the level changed.
    pub fn advance<O: Outputs>(&mut self, session: Session, out: &mut O) -> Result<bool, O::Error> {
        if session != Session::PreGame {
            return Ok(false);
        }
        self.current = self.current.next();
        self.show(out)?;
        Ok(true)
    }

    pub fn show<O: Outputs>(&self, out: &mut O) -> Result<(), O::Error> {
        out.show_glyph(self.current.glyph())
    }
}

impl Default for DifficultySelector {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
