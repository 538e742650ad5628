use crate::model::Point;

/// Column of edge anchors for inverse attributes.
pub const INVERSE_X: u32 = 0;
/// Column of edge anchors for forward attributes.
pub const FORWARD_X: u32 = 200;
/// Anchor height of the first attribute row.
pub const FIRST_ROW_Y: u32 = 68;
/// Height of one attribute row.
pub const ROW_STEP: u32 = 29;

/// Hands out edge anchors while walking a node's attributes in order.
///
/// Forward and inverse attributes fill separate columns. Each attribute
/// with a value takes the next row of its column; an attribute without a
/// value shares the row of the last valued attribute in that column, so
/// blanks never open gaps.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeLayout {
    forward: u32,
    inverse: u32,
}

impl EdgeLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, inverse: bool, has_value: bool) -> Point {
        let (x, count) = if inverse {
            (INVERSE_X, &mut self.inverse)
        } else {
            (FORWARD_X, &mut self.forward)
        };

        let row = if has_value {
            let row = *count;
            *count += 1;
            row
        } else {
            count.saturating_sub(1)
        };

        Point {
            x,
            y: FIRST_ROW_Y + row * ROW_STEP,
        }
    }

    /// Number of valued attributes placed so far, per column.
    #[must_use]
    pub fn present_counts(&self) -> (u32, u32) {
        (self.forward, self.inverse)
    }
}
