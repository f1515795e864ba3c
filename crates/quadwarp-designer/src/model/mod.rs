//! Path geometry model.
//!
//! A path is held as a list of subpaths, each a list of cubic-Bezier nodes.
//! Every node stores the control point leading into it, its on-curve anchor
//! and the control point leading out of it, so any point transform can be
//! applied by mapping those three points independently.

use lyon::geom::{point, CubicBezierSegment};
use quadwarp_core::{Point, SourceBox};

mod path;

/// One cubic-Bezier node: incoming control, anchor, outgoing control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub incoming: Point,
    pub anchor: Point,
    pub outgoing: Point,
}

impl Node {
    pub fn new(incoming: Point, anchor: Point, outgoing: Point) -> Self {
        Self {
            incoming,
            anchor,
            outgoing,
        }
    }

    /// Node with both handles retracted onto the anchor.
    pub fn corner(anchor: Point) -> Self {
        Self::new(anchor, anchor, anchor)
    }

    fn try_map<T: PointTransform>(&self, t: &T) -> Result<Node, T::Error> {
        Ok(Node::new(
            t.apply(self.incoming)?,
            t.apply(self.anchor)?,
            t.apply(self.outgoing)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub nodes: Vec<Node>,
    pub closed: bool,
}

/// A transform that maps single points and may fail.
pub trait PointTransform {
    type Error;

    fn apply(&self, p: Point) -> Result<Point, Self::Error>;
}

/// Parsed path geometry: subpaths of cubic-Bezier nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuperPath {
    pub subpaths: Vec<Subpath>,
}

impl SuperPath {
    pub fn new(subpaths: Vec<Subpath>) -> Self {
        Self { subpaths }
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn node_count(&self) -> usize {
        self.subpaths.iter().map(|s| s.nodes.len()).sum()
    }

    /// On-curve points of the first subpath, in traversal order.
    pub fn anchors(&self) -> Vec<Point> {
        self.subpaths
            .first()
            .map(|s| s.nodes.iter().map(|n| n.anchor).collect())
            .unwrap_or_default()
    }

    /// Apply `t` to every point of every node, returning the mapped copy.
    ///
    /// The first failing point aborts the whole mapping; `self` is untouched.
    pub fn try_map_points<T: PointTransform>(&self, t: &T) -> Result<SuperPath, T::Error> {
        let subpaths = self
            .subpaths
            .iter()
            .map(|sub| {
                let nodes = sub
                    .nodes
                    .iter()
                    .map(|n| n.try_map(t))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Subpath {
                    nodes,
                    closed: sub.closed,
                })
            })
            .collect::<Result<Vec<_>, T::Error>>()?;
        Ok(SuperPath { subpaths })
    }

    /// Tight bounding box of the drawn geometry, or `None` for an empty path.
    ///
    /// Computed in double precision. Curves are only solved for extrema on an
    /// axis where a control point lies outside the span of its end points;
    /// otherwise the end points bound the curve exactly.
    pub fn bounds(&self) -> Option<SourceBox> {
        let mut extent: Option<Extent> = None;
        for sub in &self.subpaths {
            let Some(first) = sub.nodes.first() else {
                continue;
            };
            let e = extent.get_or_insert_with(|| Extent::at(first.anchor));
            e.include(first.anchor);
            for pair in sub.nodes.windows(2) {
                e.include_curve(pair[0].anchor, pair[0].outgoing, pair[1].incoming, pair[1].anchor);
            }
        }
        extent.map(|e| SourceBox::from_corners(e.min_x, e.min_y, e.max_x, e.max_y))
    }

    /// Serialize as SVG path data using only `M`, `C` and `Z`.
    ///
    /// * `precision` - digits after the decimal point; `None` writes the
    ///   shortest exact representation
    pub fn to_path_data(&self, precision: Option<usize>) -> String {
        let fmt_point = |p: Point| {
            format!(
                "{},{}",
                format_number(p.x, precision),
                format_number(p.y, precision)
            )
        };

        let mut parts: Vec<String> = Vec::new();
        for sub in &self.subpaths {
            let Some(first) = sub.nodes.first() else {
                continue;
            };
            parts.push(format!("M {}", fmt_point(first.anchor)));
            for pair in sub.nodes.windows(2) {
                parts.push(format!(
                    "C {} {} {}",
                    fmt_point(pair[0].outgoing),
                    fmt_point(pair[1].incoming),
                    fmt_point(pair[1].anchor)
                ));
            }
            if sub.closed {
                parts.push("Z".to_string());
            }
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    fn at(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn include_curve(&mut self, from: Point, ctrl1: Point, ctrl2: Point, to: Point) {
        self.include(to);

        let curve = CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(to.x, to.y),
        };
        let outside = |a: f64, b: f64, c1: f64, c2: f64| {
            let (lo, hi) = (a.min(b), a.max(b));
            c1 < lo || c1 > hi || c2 < lo || c2 > hi
        };
        if outside(from.x, to.x, ctrl1.x, ctrl2.x) {
            let (lo, hi) = curve.bounding_range_x();
            self.min_x = self.min_x.min(lo);
            self.max_x = self.max_x.max(hi);
        }
        if outside(from.y, to.y, ctrl1.y, ctrl2.y) {
            let (lo, hi) = curve.bounding_range_y();
            self.min_y = self.min_y.min(lo);
            self.max_y = self.max_y.max(hi);
        }
    }
}

fn format_number(value: f64, precision: Option<usize>) -> String {
    let mut s = match precision {
        Some(digits) => {
            let s = format!("{:.*}", digits, value);
            if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        None => format!("{}", value),
    };
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shift(f64, f64);

    impl PointTransform for Shift {
        type Error = ();

        fn apply(&self, p: Point) -> Result<Point, ()> {
            Ok(Point::new(p.x + self.0, p.y + self.1))
        }
    }

    struct RejectNegative;

    impl PointTransform for RejectNegative {
        type Error = Point;

        fn apply(&self, p: Point) -> Result<Point, Point> {
            if p.x < 0.0 {
                Err(p)
            } else {
                Ok(p)
            }
        }
    }

    fn square() -> SuperPath {
        SuperPath::parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0, None), "1");
        assert_eq!(format_number(0.1, None), "0.1");
        assert_eq!(format_number(1.23456, Some(2)), "1.23");
        assert_eq!(format_number(2.5, Some(3)), "2.5");
        assert_eq!(format_number(10.0, Some(0)), "10");
        assert_eq!(format_number(-0.0001, Some(2)), "0");
    }

    #[test]
    fn test_to_path_data_closed() {
        let d = square().to_path_data(None);
        assert_eq!(
            d,
            "M 0,0 C 0,0 10,0 10,0 C 10,0 10,10 10,10 C 10,10 0,10 0,10 C 0,10 0,0 0,0 Z"
        );
    }

    #[test]
    fn test_serialized_data_parses_back() {
        let path = SuperPath::parse("M 1 2 C 3 4 5 6 7 8 L 9 10").unwrap();
        let reparsed = SuperPath::parse(&path.to_path_data(None)).unwrap();
        assert_eq!(reparsed, path);
    }

    #[test]
    fn test_try_map_points() {
        let moved = square().try_map_points(&Shift(5.0, -1.0)).unwrap();
        assert_eq!(moved.node_count(), square().node_count());
        assert_eq!(moved.anchors()[0], Point::new(5.0, -1.0));
        assert!(moved.subpaths[0].closed);
    }

    #[test]
    fn test_try_map_points_failure_leaves_source() {
        let path = SuperPath::parse("M 1 1 L -1 1").unwrap();
        let err = path.try_map_points(&RejectNegative).unwrap_err();
        assert_eq!(err, Point::new(-1.0, 1.0));
        assert_eq!(path.anchors()[1], Point::new(-1.0, 1.0));
    }

    #[test]
    fn test_bounds_of_lines() {
        let bb = square().bounds().unwrap();
        assert!((bb.x - 0.0).abs() < 1e-6);
        assert!((bb.y - 0.0).abs() < 1e-6);
        assert!((bb.width - 10.0).abs() < 1e-6);
        assert!((bb.height - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_of_curve_is_tight() {
        // Control points reach y = 10, the curve itself peaks at y = 7.5
        let path = SuperPath::parse("M 0 0 C 0 10 10 10 10 0").unwrap();
        let bb = path.bounds().unwrap();
        assert!((bb.height - 7.5).abs() < 1e-3, "height {}", bb.height);
        assert!((bb.width - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounds_far_from_origin_are_exact() {
        let path =
            SuperPath::parse("M 10000.3,10000.3 L 10010.7,10000.3 L 10010.7,10010.7 L 10000.3,10010.7 Z")
                .unwrap();
        let bb = path.bounds().unwrap();
        assert_eq!(bb.x, 10000.3);
        assert_eq!(bb.y, 10000.3);
        assert_eq!(bb.x + bb.width, 10010.7);
        assert_eq!(bb.y + bb.height, 10010.7);
    }

    #[test]
    fn test_bounds_of_single_point_subpath() {
        let path = SuperPath::parse("M 0 0 L 4 4 M -3 9").unwrap();
        let bb = path.bounds().unwrap();
        assert_eq!((bb.x, bb.y), (-3.0, 0.0));
        assert_eq!((bb.width, bb.height), (7.0, 9.0));
    }

    #[test]
    fn test_empty_path() {
        let path = SuperPath::default();
        assert!(path.is_empty());
        assert!(path.bounds().is_none());
        assert!(path.anchors().is_empty());
        assert_eq!(path.to_path_data(None), "");
    }
}
