//! Bounding-box containment.

use crate::point::{Point, Rectangle};

/// Whether `point` lies inside `rect`, edges included.
///
/// The corners of `rect` are normalized independently on each axis, so a
/// rectangle with swapped `lo`/`hi` describes the same box.
///
/// # Examples
///
/// ```
/// use routeguide::{in_range, Point, Rectangle};
///
/// let rect = Rectangle::new(Point::new(10, 10), Point::new(0, 0));
/// assert!(in_range(Point::new(0, 10), &rect));
/// assert!(!in_range(Point::new(11, 5), &rect));
/// ```
pub fn in_range(point: Point, rect: &Rectangle) -> bool {
    let left = rect.lo.longitude.min(rect.hi.longitude);
    let right = rect.lo.longitude.max(rect.hi.longitude);
    let bottom = rect.lo.latitude.min(rect.hi.latitude);
    let top = rect.lo.latitude.max(rect.hi.latitude);

    (left..=right).contains(&point.longitude) && (bottom..=top).contains(&point.latitude)
}

impl Rectangle {
    /// See [`in_range`].
    pub fn contains(&self, point: Point) -> bool {
        in_range(point, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rectangle {
        Rectangle::new(
            Point::new(400000000, -750000000),
            Point::new(420000000, -730000000),
        )
    }

    #[test]
    fn test_inside() {
        assert!(in_range(Point::new(409146138, -746188906), &rect()));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let r = rect();
        assert!(r.contains(Point::new(400000000, -750000000)));
        assert!(r.contains(Point::new(420000000, -730000000)));
        assert!(r.contains(Point::new(400000000, -730000000)));
        assert!(r.contains(Point::new(420000000, -740000000)));
    }

    #[test]
    fn test_outside() {
        let r = rect();
        assert!(!r.contains(Point::new(399999999, -740000000)));
        assert!(!r.contains(Point::new(420000001, -740000000)));
        assert!(!r.contains(Point::new(410000000, -750000001)));
        assert!(!r.contains(Point::new(410000000, -729999999)));
    }

    #[test]
    fn test_swapped_corners() {
        let r = rect();
        let swapped = Rectangle::new(r.hi, r.lo);
        // Mixed corners: lo has the larger latitude, hi the larger longitude
        let mixed = Rectangle::new(
            Point::new(420000000, -750000000),
            Point::new(400000000, -730000000),
        );
        for p in [
            Point::new(409146138, -746188906),
            Point::new(400000000, -750000000),
            Point::new(0, 0),
            Point::new(419999999, -730000001),
        ] {
            assert_eq!(in_range(p, &r), in_range(p, &swapped));
            assert_eq!(in_range(p, &r), in_range(p, &mixed));
        }
    }

    #[test]
    fn test_degenerate_rectangle() {
        let p = Point::new(5, 5);
        let r = Rectangle::new(p, p);
        assert!(r.contains(p));
        assert!(!r.contains(Point::new(5, 6)));
    }
}
