use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts, cell counts, and linear indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Signed coordinate offset `(dx, dy)`.
pub type Delta2 = (isize, isize);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: Delta2, bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let dim = grid.dim();
    (
        dim.0.try_into().expect("board width exceeds coordinate range"),
        dim.1.try_into().expect("board height exceeds coordinate range"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_stays_in_bounds() {
        assert_eq!(apply_delta((1, 1), (1, 0), (3, 3)), Some((2, 1)));
        assert_eq!(apply_delta((1, 1), (-1, -1), (3, 3)), Some((0, 0)));
    }

    #[test]
    fn apply_delta_rejects_underflow_and_overflow() {
        assert_eq!(apply_delta((0, 0), (-1, 0), (3, 3)), None);
        assert_eq!(apply_delta((0, 0), (0, -1), (3, 3)), None);
        assert_eq!(apply_delta((2, 2), (1, 0), (3, 3)), None);
        assert_eq!(apply_delta((2, 2), (0, 1), (3, 3)), None);
    }

    #[test]
    fn mult_saturates_instead_of_overflowing() {
        assert_eq!(mult(3, 4), 12);
        assert_eq!(mult(255, 255), 255 * 255);
    }
}
