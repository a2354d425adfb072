//! Facing tracker with sign-change hysteresis
//!
//! The character keeps its orientation until the horizontal axis
//! strictly changes sign; zero input never flips, so the sprite does
//! not flicker around the dead zone.

/// Horizontal orientation of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Unit direction along the X axis
    pub fn direction(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Tracks facing from the horizontal input axis
#[derive(Debug, Clone)]
pub struct FacingTracker {
    facing: Facing,
}

impl Default for FacingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FacingTracker {
    /// Create a tracker facing right (the spawn orientation)
    pub fn new() -> Self {
        Self {
            facing: Facing::Right,
        }
    }

    /// Observe the horizontal axis for this frame
    ///
    /// Returns true if the facing flipped. Only a strict sign change
    /// flips; zero input is a no-op.
    pub fn observe(&mut self, axis: f32) -> bool {
        match self.facing {
            Facing::Right if axis < 0.0 => {
                self.facing = Facing::Left;
                true
            }
            Facing::Left if axis > 0.0 => {
                self.facing = Facing::Right;
                true
            }
            _ => false,
        }
    }

    /// The current facing
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether the character faces right
    pub fn is_facing_right(&self) -> bool {
        self.facing == Facing::Right
    }

    /// Whether the character faces left
    pub fn is_facing_left(&self) -> bool {
        self.facing == Facing::Left
    }

    /// Sprite horizontal-mirror flag, derived 1:1 from facing
    pub fn flip_x(&self) -> bool {
        self.facing == Facing::Left
    }
}
