//! Horizontal and vertical mirroring applied to every decoded coordinate.

use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Pos;

use super::rng::coin_flip;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationMirror {
    pub flip_x: bool,
    pub flip_y: bool,
}

impl OrientationMirror {
    pub const IDENTITY: OrientationMirror = OrientationMirror { flip_x: false, flip_y: false };

    /// Rolls both flips once per decode, horizontal first.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let flip_x = coin_flip(rng);
        let flip_y = coin_flip(rng);
        Self { flip_x, flip_y }
    }

    pub fn apply(self, column: usize, row: usize) -> Pos {
        Pos { y: row as i32 * sign(self.flip_y), x: column as i32 * sign(self.flip_x) }
    }
}

fn sign(flip: bool) -> i32 {
    if flip { -1 } else { 1 }
}
