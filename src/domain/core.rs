//! Core geometric types and operations
//!
//! Pure value types shared by the factory, hit tester and statistics engine.
//! Nothing here knows which coordinate space it lives in; callers decide
//! whether a `Point` is in image pixels or on the rendering canvas.

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Shortest distance from this point to the segment `a`-`b`
    ///
    /// A zero-length segment degrades to the distance to `a`.
    pub fn distance_to_segment(&self, a: Point, b: Point) -> f64 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let len_sq = abx * abx + aby * aby;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }

        let t = (((self.x - a.x) * abx + (self.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
        self.distance_to(Point::new(a.x + t * abx, a.y + t * aby))
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned rectangle with floating point coordinates
///
/// Always stored normalized: `w` and `h` are never negative, whatever
/// order the corners were supplied in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Builds the rectangle spanned by two opposite corners, independent of draw direction
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Returns the four corners clockwise from top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Returns true if the point lies inside or on the border
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Minimum distance from the point to any of the four edges
    pub fn distance_to_edges(&self, p: Point) -> f64 {
        polygon_edge_distance(&self.corners(), p)
    }

    /// Returns the area of the rectangle
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns the centre of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Minimum distance from `p` to the closed polygon outline through `vertices`
///
/// Every edge is measured independently and the smallest distance wins.
pub fn polygon_edge_distance(vertices: &[Point], p: Point) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| p.distance_to_segment(vertices[i], vertices[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd point-in-polygon test
pub fn polygon_contains(vertices: &[Point], p: Point) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_corners_is_order_independent() {
        let a = Rect::from_corners(Point::new(10.0, 20.0), Point::new(2.0, 4.0));
        let b = Rect::from_corners(Point::new(2.0, 4.0), Point::new(10.0, 20.0));
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(2.0, 4.0, 8.0, 16.0));
        assert_eq!(a.right(), 10.0);
        assert_eq!(a.bottom(), 20.0);
        assert_eq!(a.area(), 128.0);
    }

    #[test]
    fn rect_contains_point() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains_point(Point::new(15.0, 15.0))); // Inside
        assert!(rect.contains_point(Point::new(10.0, 10.0))); // Top-left corner
        assert!(rect.contains_point(Point::new(30.0, 30.0))); // Bottom-right corner
        assert!(!rect.contains_point(Point::new(31.0, 15.0)));
        assert!(!rect.contains_point(Point::new(5.0, 5.0)));
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(Point::new(5.0, 3.0).distance_to_segment(a, b), 3.0);
        // Beyond the end the distance is to the endpoint
        assert_eq!(Point::new(13.0, 4.0).distance_to_segment(a, b), 5.0);
        // Zero-length segment
        assert_eq!(Point::new(3.0, 4.0).distance_to_segment(a, a), 5.0);
    }

    #[test]
    fn edge_distance_takes_minimum_over_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(rect.distance_to_edges(Point::new(50.0, 10.0)), 10.0);
        assert_eq!(rect.distance_to_edges(Point::new(97.0, 25.0)), 3.0);
        assert_eq!(rect.distance_to_edges(Point::new(-4.0, 25.0)), 4.0);
    }

    #[test]
    fn polygon_contains_diamond() {
        let diamond = [
            Point::new(0.0, -10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-10.0, 0.0),
        ];
        assert!(polygon_contains(&diamond, Point::new(0.0, 0.0)));
        assert!(polygon_contains(&diamond, Point::new(4.0, 4.0)));
        assert!(!polygon_contains(&diamond, Point::new(8.0, 8.0)));
        assert!(!polygon_contains(&diamond[..2], Point::new(0.0, 0.0)));
    }
}
