//! Integral geometry for placed diagram components.
//!
//! Every coordinate the engine emits is an integer, so the types here store
//! `i32` values. Conversions from scaled floating point values truncate
//! toward zero (see [`scaled`]) and saturate at the `i32` range, as does all
//! arithmetic on these types.

/// Scales a pre-scale constant by `multiplier`, truncating toward zero.
pub fn scaled(value: i32, multiplier: f64) -> i32 {
    (f64::from(value) * multiplier) as i32
}

/// A point in document space. `(0, 0)` is the top-left corner of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns the vector from this point to `other`, widened so it is exact
    /// for any two points.
    pub fn delta_to(self, other: Point) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Builds a size from floating point dimensions, truncating toward zero.
    pub fn from_f32(width: f32, height: f32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    /// Returns a square size with the given side length
    pub fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i32 {
        self.height
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// This is the geometry the draw.io format stores for a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn origin(self) -> Point {
        self.origin
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn x(self) -> i32 {
        self.origin.x
    }

    pub fn y(self) -> i32 {
        self.origin.y
    }

    pub fn width(self) -> i32 {
        self.size.width
    }

    pub fn height(self) -> i32 {
        self.size.height
    }

    /// Returns the bounding box covered by this rectangle
    pub fn bounds(self) -> Bounds {
        Bounds {
            min_x: self.origin.x,
            min_y: self.origin.y,
            max_x: self.origin.x.saturating_add(self.size.width),
            max_y: self.origin.y.saturating_add(self.size.height),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> i32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> i32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> i32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> i32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Returns the height of the bounds
    pub fn height(self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Returns the smallest bounds covering both `self` and `other`.
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if `other` lies entirely inside these bounds (edges may touch).
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// Returns true if the interiors of the two bounds overlap.
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_scaled_truncates_toward_zero() {
        assert_eq!(scaled(250, 1.0), 250);
        assert_eq!(scaled(250, 0.8), 200);
        assert_eq!(scaled(350, 0.75), 262);
        assert_eq!(scaled(50, 1.33), 66);
    }

    #[test]
    fn test_rect_bounds() {
        let rect = Rect::new(Point::new(10, 20), Size::new(120, 60));
        let bounds = rect.bounds();

        assert_eq!(bounds.min_x(), 10);
        assert_eq!(bounds.min_y(), 20);
        assert_eq!(bounds.max_x(), 130);
        assert_eq!(bounds.max_y(), 80);
        assert_eq!(bounds.width(), 120);
        assert_eq!(bounds.height(), 60);
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new(0, 0, 10, 10);
        let b = Bounds::new(5, -5, 20, 8);

        assert_eq!(a.merge(&b), Bounds::new(0, -5, 20, 10));
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new(0, 0, 100, 100);

        assert!(outer.contains(&Bounds::new(0, 0, 100, 100)));
        assert!(outer.contains(&Bounds::new(10, 10, 20, 20)));
        assert!(!outer.contains(&Bounds::new(-1, 10, 20, 20)));
        assert!(!outer.contains(&Bounds::new(10, 10, 101, 20)));
    }

    #[test]
    fn test_bounds_intersects_ignores_touching_edges() {
        let a = Bounds::new(0, 0, 10, 10);

        assert!(a.intersects(&Bounds::new(5, 5, 15, 15)));
        assert!(!a.intersects(&Bounds::new(10, 0, 20, 10)));
        assert!(!a.intersects(&Bounds::new(0, 10, 10, 20)));
    }

    #[test]
    fn test_size_from_f32_truncates() {
        let size = Size::from_f32(120.9, 59.5);
        assert_eq!(size, Size::new(120, 59));
    }

    #[test]
    fn test_point_delta() {
        let a = Point::new(10, 100);
        let b = Point::new(40, 50);
        assert_eq!(a.delta_to(b), (30, -50));
    }

    #[test]
    fn test_extreme_values_saturate() {
        let far_left = Point::new(i32::MIN, 0);
        let far_right = Point::new(i32::MAX, 0);
        assert_eq!(far_left.delta_to(far_right), (i64::from(u32::MAX), 0));
        assert_eq!(far_right.delta_to(far_left), (-i64::from(u32::MAX), 0));

        let rect = Rect::new(Point::new(625, 100), Size::new(i32::MAX, 60));
        let bounds = rect.bounds();
        assert_eq!(bounds.max_x(), i32::MAX);
        assert_eq!(bounds.width(), i32::MAX - 625);

        let wide = Bounds::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(wide.width(), i32::MAX);
        assert_eq!(wide.height(), i32::MAX);
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-1000..1000i32, -1000..1000i32, 0..500i32, 0..500i32)
            .prop_map(|(x, y, w, h)| Rect::new(Point::new(x, y), Size::new(w, h)).bounds())
    }

    proptest! {
        #[test]
        fn merge_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            let merged = a.merge(&b);
            prop_assert!(merged.contains(&a));
            prop_assert!(merged.contains(&b));
        }
    }
}
