/// Integer points along the discretized segment from `from` to `to`.
///
/// The sequence excludes the starting point itself: the first yielded point
/// is one rasterization step away from `from`, and the last yielded point is
/// `to`. Tracing a point to itself yields nothing.
pub fn int_trace(from: (isize, isize), to: (isize, isize)) -> IntTrace {
    IntTrace::new(from, to)
}

/// Bresenham line walker over signed integer grid coordinates.
#[derive(Debug, Clone)]
pub struct IntTrace {
    x: isize,
    y: isize,
    end: (isize, isize),
    step_x: isize,
    step_y: isize,
    dx: isize,
    dy: isize,
    err: isize,
    done: bool,
}

impl IntTrace {
    fn new(from: (isize, isize), to: (isize, isize)) -> Self {
        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        Self {
            x: from.0,
            y: from.1,
            end: to,
            step_x: if from.0 < to.0 { 1 } else { -1 },
            step_y: if from.1 < to.1 { 1 } else { -1 },
            dx,
            dy,
            err: dx + dy,
            done: from == to,
        }
    }
}

impl Iterator for IntTrace {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let doubled = 2 * self.err;
        if doubled >= self.dy {
            self.err += self.dy;
            self.x += self.step_x;
        }
        if doubled <= self.dx {
            self.err += self.dx;
            self.y += self.step_y;
        }

        if (self.x, self.y) == self.end {
            self.done = true;
        }
        Some((self.x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(from: (isize, isize), to: (isize, isize)) -> Vec<(isize, isize)> {
        int_trace(from, to).collect()
    }

    #[test]
    fn degenerate_trace_is_empty() {
        assert_eq!(collect((3, 3), (3, 3)), vec![]);
    }

    #[test]
    fn horizontal_trace_walks_every_column() {
        assert_eq!(collect((0, 2), (3, 2)), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(collect((3, 2), (0, 2)), vec![(2, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn vertical_trace_walks_every_row() {
        assert_eq!(collect((1, 0), (1, 3)), vec![(1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn diagonal_trace_steps_both_axes() {
        assert_eq!(collect((0, 0), (3, 3)), vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(collect((0, 3), (3, 0)), vec![(1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn trace_starts_adjacent_and_ends_at_target() {
        for &(from, to) in &[
            ((0isize, 0isize), (5isize, 2isize)),
            ((4, 1), (0, 6)),
            ((-2, -2), (3, 1)),
        ] {
            let points = collect(from, to);
            let first = points[0];
            assert!((first.0 - from.0).abs().max((first.1 - from.1).abs()) == 1);
            assert_eq!(*points.last().unwrap(), to);

            let mut prev = from;
            for point in points {
                let step = (point.0 - prev.0).abs().max((point.1 - prev.1).abs());
                assert_eq!(step, 1, "non-unit step from {prev:?} to {point:?}");
                prev = point;
            }
        }
    }
}
