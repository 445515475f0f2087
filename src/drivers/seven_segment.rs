use embedded_hal::digital::v2::OutputPin;

/// Symbols the 7-segment display can show
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Values above 9 render blank
    Digit(u8),
    E,
    I,
    H,
    S,
    L,
}

// Segment bits: bit 0 = a ... bit 6 = g
const DIGITS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

const LETTER_E: u8 = 0x79;
const LETTER_I: u8 = 0x06;
const LETTER_H: u8 = 0x76;
const LETTER_S: u8 = 0x6D;
const LETTER_L: u8 = 0x38;

impl Glyph {
    pub fn segments(self) -> u8 {
        match self {
            Glyph::Blank => 0,
            Glyph::Digit(d) => DIGITS.get(usize::from(d)).copied().unwrap_or(0),
            Glyph::E => LETTER_E,
            Glyph::I => LETTER_I,
            Glyph::H => LETTER_H,
            Glyph::S => LETTER_S,
            Glyph::L => LETTER_L,
        }
    }
}

/// Common-cathode display, one pin per segment in a..g order
pub struct SevenSegment<P> {
    segments: [P; 7],
    last: Glyph,
}

impl<P: OutputPin> SevenSegment<P> {
    pub fn new(segments: [P; 7]) -> Self {
        Self {
            segments,
            last: Glyph::Blank,
        }
    }

    /// Blank every segment, then light the glyph's pattern
    pub fn show(&mut self, glyph: Glyph) -> Result<(), P::Error> {
        self.clear()?;
        let pattern = glyph.segments();
        for (i, seg) in self.segments.iter_mut().enumerate() {
            if pattern & (1 << i) != 0 {
                seg.set_high()?;
            } else {
                seg.set_low()?;
            }
        }
        self.last = glyph;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), P::Error> {
        for seg in self.segments.iter_mut() {
            seg.set_low()?;
        }
        self.last = Glyph::Blank;
        Ok(())
    }

    pub fn last(&self) -> Glyph {
        self.last
    }
}
