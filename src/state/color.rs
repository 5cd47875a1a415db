use rand::{Rng, SeedableRng, rngs::StdRng};

/// Symbolic colors a player can tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red button.
    Red,
    /// Orange button.
    Orange,
    /// Yellow button.
    Yellow,
    /// Green button.
    Green,
    /// Blue button.
    Blue,
    /// Purple button.
    Purple,
}

impl Color {
    /// Whole palette, in button order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];
}

/// Source of colors used to build sequences.
pub trait ColorSource {
    /// Draw the next color.
    fn next_color(&mut self) -> Color;
}

/// Uniform sampling over [`Color::ALL`] backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source, mostly useful in tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color {
        Color::ALL[self.rng.random_range(0..Color::ALL.len())]
    }
}

/// Ordered list of colors the player has to reproduce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence(Vec<Color>);

impl Sequence {
    /// Draw `len` colors independently from `source`.
    pub fn generate(len: usize, source: &mut dyn ColorSource) -> Self {
        Self((0..len).map(|_| source.next_color()).collect())
    }

    /// Number of colors in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the placeholder sequence of a session that never started.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Ordered, element-by-element comparison with the player's taps.
    pub fn matches(&self, input: &[Color]) -> bool {
        self.0.as_slice() == input
    }
}

impl From<Vec<Color>> for Sequence {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}
