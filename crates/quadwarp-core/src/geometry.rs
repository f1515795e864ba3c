//! Geometry primitives
//!
//! Points, segments, the axis-aligned source box and the destination
//! quadrilateral used by the warp engine. Everything here is a plain value
//! type in document user units.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are within `tolerance` of `other`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Directed line segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn delta_x(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn delta_y(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn length(&self) -> f64 {
        self.delta_x().hypot(self.delta_y())
    }

    /// Point at parametric `ratio` along the segment.
    ///
    /// `0.0` is `start`, `1.0` is `end`; values outside `[0, 1]` extrapolate.
    pub fn point_at_ratio(&self, ratio: f64) -> Point {
        Point::new(
            self.start.x + ratio * self.delta_x(),
            self.start.y + ratio * self.delta_y(),
        )
    }

    /// True when both ends are the same point.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Intersection of the infinite lines through `self` and `other`.
    ///
    /// Solves `self.start + u * self.delta == other.start + v * other.delta`
    /// and returns the point at `u` on `self`. The result may lie outside
    /// either segment. A zero-length segment has no direction; its own point
    /// is returned instead (`self` first).
    pub fn intersect(&self, other: &Segment) -> Result<Point, GeometryError> {
        if self.is_degenerate() {
            return Ok(self.start);
        }
        if other.is_degenerate() {
            return Ok(other.start);
        }

        let (x1, y1) = (self.start.x, self.start.y);
        let (x2, y2) = (self.end.x, self.end.y);
        let (x3, y3) = (other.start.x, other.start.y);
        let (x4, y4) = (other.end.x, other.end.y);

        let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
        let num1 = (x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3);
        let num2 = (x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3);

        // Scale-aware zero test on the cross product of the two directions
        let tolerance = f64::EPSILON * self.length() * other.length();
        if denom.abs() <= tolerance {
            if num1.abs() <= tolerance && num2.abs() <= tolerance {
                return Err(GeometryError::CoincidentSegments);
            }
            return Err(GeometryError::ParallelSegments);
        }

        let u = num1 / denom;
        Ok(Point::new(x1 + u * (x2 - x1), y1 + u * (y2 - y1)))
    }
}

/// Axis-aligned bounding box of the object being warped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanning two opposite corners
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Re-express a box measured in a bottom-up frame in the top-down
    /// document frame: `y' = document_height - y - height`.
    pub fn flipped(&self, document_height: f64) -> Self {
        Self::new(
            self.x,
            document_height - self.y - self.height,
            self.width,
            self.height,
        )
    }

    /// Check that the box can be used as a divisor in both axes
    pub fn validate(&self) -> Result<(), GeometryError> {
        let usable = |v: f64| v.is_finite() && v != 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(GeometryError::DegenerateSourceBox {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl fmt::Display for SourceBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Direction of the y axis in the frame a box was measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    /// y grows downwards, as in SVG user space
    #[default]
    TopDown,
    /// y grows upwards from the bottom of the page
    BottomUp,
}

impl fmt::Display for AxisOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopDown => write!(f, "top_down"),
            Self::BottomUp => write!(f, "bottom_up"),
        }
    }
}

impl std::str::FromStr for AxisOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "top_down" => Ok(Self::TopDown),
            "bottom_up" => Ok(Self::BottomUp),
            _ => Err(format!("Unknown axis orientation: {}", s)),
        }
    }
}

/// Destination quadrilateral, corners in path traversal order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Build from the first four points of `points`; extra points are ignored.
    ///
    /// Returns `None` when fewer than four points are available.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        match points {
            [a, b, c, d, ..] => Some(Self::new([*a, *b, *c, *d])),
            _ => None,
        }
    }

    /// node0 -> node1
    pub fn top(&self) -> Segment {
        Segment::new(self.corners[0], self.corners[1])
    }

    /// node1 -> node2
    pub fn right(&self) -> Segment {
        Segment::new(self.corners[1], self.corners[2])
    }

    /// node3 -> node2, running the same way as `top`
    pub fn bottom(&self) -> Segment {
        Segment::new(self.corners[3], self.corners[2])
    }

    /// node0 -> node3, running the same way as `right`
    pub fn left(&self) -> Segment {
        Segment::new(self.corners[0], self.corners[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_ratio() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(s.point_at_ratio(0.0), Point::new(0.0, 0.0));
        assert_eq!(s.point_at_ratio(0.5), Point::new(5.0, 10.0));
        assert_eq!(s.point_at_ratio(1.0), Point::new(10.0, 20.0));
        assert_eq!(s.point_at_ratio(2.0), Point::new(20.0, 40.0));
        assert_eq!(s.delta_x(), 10.0);
        assert_eq!(s.delta_y(), 20.0);
    }

    #[test]
    fn test_intersect_crossing() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        let p = a.intersect(&b).unwrap();
        assert!(p.approx_eq(&Point::new(5.0, 5.0), 1e-12));
    }

    #[test]
    fn test_intersect_extends_lines() {
        // Segments do not overlap, the lines through them do
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let b = Segment::new(Point::new(5.0, 1.0), Point::new(5.0, 2.0));
        let p = a.intersect(&b).unwrap();
        assert!(p.approx_eq(&Point::new(5.0, 0.0), 1e-12));
    }

    #[test]
    fn test_intersect_parallel() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let b = Segment::new(Point::new(0.0, 1.0), Point::new(10.0, 1.0));
        assert_eq!(a.intersect(&b), Err(GeometryError::ParallelSegments));
    }

    #[test]
    fn test_intersect_coincident() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let b = Segment::new(Point::new(2.0, 0.0), Point::new(4.0, 0.0));
        assert_eq!(a.intersect(&b), Err(GeometryError::CoincidentSegments));
    }

    #[test]
    fn test_intersect_zero_length() {
        let dot = Segment::new(Point::new(3.0, 4.0), Point::new(3.0, 4.0));
        let line = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(dot.is_degenerate());
        assert!(!line.is_degenerate());
        assert_eq!(dot.intersect(&line), Ok(Point::new(3.0, 4.0)));
        assert_eq!(line.intersect(&dot), Ok(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_source_box_validate() {
        assert!(SourceBox::new(0.0, 0.0, 10.0, 10.0).validate().is_ok());
        assert!(SourceBox::new(0.0, 0.0, -10.0, 10.0).validate().is_ok());
        assert_eq!(
            SourceBox::new(0.0, 0.0, 0.0, 10.0).validate(),
            Err(GeometryError::DegenerateSourceBox {
                width: 0.0,
                height: 10.0
            })
        );
        assert!(SourceBox::new(0.0, 0.0, 10.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_source_box_flip() {
        let b = SourceBox::new(5.0, 20.0, 10.0, 30.0).flipped(100.0);
        assert_eq!(b, SourceBox::new(5.0, 50.0, 10.0, 30.0));
        assert_eq!(b.flipped(100.0), SourceBox::new(5.0, 20.0, 10.0, 30.0));
    }

    #[test]
    fn test_quad_from_points() {
        let pts: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
        let quad = Quad::from_points(&pts).unwrap();
        assert_eq!(quad.corners[3], Point::new(3.0, 0.0));
        assert!(Quad::from_points(&pts[..3]).is_none());
    }

    #[test]
    fn test_quad_edges_direction() {
        let quad = Quad::new([
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        assert_eq!(quad.bottom().start, Point::new(0.0, 1.0));
        assert_eq!(quad.bottom().end, Point::new(1.0, 1.0));
        assert_eq!(quad.left().end, Point::new(0.0, 1.0));
        assert_eq!(quad.right().start, Point::new(1.0, 0.0));
        assert_eq!(quad.top().end, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_source_box_serde() {
        let b = SourceBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
        let back: SourceBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_axis_orientation_names() {
        assert_eq!(AxisOrientation::default(), AxisOrientation::TopDown);
        assert_eq!("bottom-up".parse::<AxisOrientation>().unwrap(), AxisOrientation::BottomUp);
        assert_eq!(AxisOrientation::BottomUp.to_string(), "bottom_up");
        assert!("sideways".parse::<AxisOrientation>().is_err());
        let json = serde_json::to_string(&AxisOrientation::TopDown).unwrap();
        assert_eq!(json, r#""top_down""#);
    }
}
