//! # Quad Warp Engine
//!
//! Maps points from an axis-aligned source box onto an arbitrary
//! quadrilateral by bilinear interpolation along the quadrilateral's edges.
//!
//! For a point `p` the fractional position inside the box is measured on each
//! axis. The same fraction is taken along the top and bottom edges (giving a
//! "horizontal" chord) and along the left and right edges (giving a
//! "vertical" chord); the mapped point is where the two chords cross.
//!
//! ```text
//!  q0 ---- top ----> q1
//!   |                 |
//!  left             right
//!   v                 v
//!  q3 --- bottom --> q2
//! ```

use quadwarp_core::{GeometryError, Point, Quad, Segment, SourceBox};

use crate::model::{PointTransform, SuperPath};

/// A validated source box paired with its destination quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadWarp {
    source: SourceBox,
    top: Segment,
    right: Segment,
    bottom: Segment,
    left: Segment,
}

impl QuadWarp {
    /// Prepare a warp from `source` onto `quad`.
    ///
    /// Fails with [`GeometryError::DegenerateSourceBox`] when the box has a
    /// zero or non-finite width or height.
    pub fn new(source: SourceBox, quad: Quad) -> Result<Self, GeometryError> {
        source.validate()?;
        Ok(Self {
            source,
            top: quad.top(),
            right: quad.right(),
            bottom: quad.bottom(),
            left: quad.left(),
        })
    }

    pub fn source(&self) -> SourceBox {
        self.source
    }

    /// Map one point.
    ///
    /// Ratios are unsigned distances from the box origin and are not
    /// clamped, so points outside the box extrapolate.
    pub fn warp(&self, p: Point) -> Result<Point, GeometryError> {
        let vector = Segment::new(self.source.origin(), p);
        let xratio = vector.delta_x().abs() / self.source.width;
        let yratio = vector.delta_y().abs() / self.source.height;

        let horz = Segment::new(
            self.top.point_at_ratio(xratio),
            self.bottom.point_at_ratio(xratio),
        );
        let vert = Segment::new(
            self.left.point_at_ratio(yratio),
            self.right.point_at_ratio(yratio),
        );

        vert.intersect(&horz)
    }

    /// Warp every node of `path` in place.
    ///
    /// On error `path` is left unmodified.
    pub fn warp_path(&self, path: &mut SuperPath) -> Result<(), GeometryError> {
        *path = path.try_map_points(self)?;
        Ok(())
    }
}

impl PointTransform for QuadWarp {
    type Error = GeometryError;

    fn apply(&self, p: Point) -> Result<Point, GeometryError> {
        self.warp(p)
    }
}

/// Map a single point from `source` onto `quad`.
pub fn warp(point: Point, source: SourceBox, quad: Quad) -> Result<Point, GeometryError> {
    QuadWarp::new(source, quad)?.warp(point)
}
