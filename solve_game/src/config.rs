use rand::Rng;
use strum::{Display, EnumString};

pub const BOARD_SIZE: usize = 3;

pub const COMPUTER_WIN_SCORE: i32 = 1;
pub const HUMAN_WIN_SCORE: i32 = -1;
pub const DRAW_SCORE: i32 = 0;

/// Which side places the first mark.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstMover {
    #[default]
    Human,
    Computer,
    Random,
}

impl FirstMover {
    /// Settles `Random` into one of the two concrete sides.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            Self::Random if rng.gen_bool(0.5) => Self::Computer,
            Self::Random => Self::Human,
            other => other,
        }
    }
}
