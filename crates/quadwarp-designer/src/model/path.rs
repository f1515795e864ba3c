use quadwarp_core::units::split_number;
use quadwarp_core::Point;

use super::{Node, Subpath, SuperPath};
use crate::error::PathError;

impl SuperPath {
    /// Parse SVG path data into cubic-Bezier nodes.
    ///
    /// Supports the full command set `m/l/h/v/c/s/q/t/a/z` (and their uppercase
    /// forms), implicit command repetition and compact number syntax such as
    /// `10-5` or `.5.5`. Quadratic segments are raised to cubics and arcs are
    /// split into cubic pieces of at most 90 degrees.
    pub fn parse(data: &str) -> Result<SuperPath, PathError> {
        let mut lexer = Lexer::new(data);
        let mut builder = NodeBuilder::default();
        let mut previous: Option<char> = None;

        loop {
            lexer.skip_separators();
            let Some(c) = lexer.peek() else {
                break;
            };
            let position = lexer.pos;

            let cmd = if c.is_ascii_alphabetic() {
                lexer.bump();
                c
            } else if starts_number(c) {
                // Numbers after a command repeat it; after a moveto they are linetos
                match previous {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some(p) if !matches!(p, 'Z' | 'z') => p,
                    None => {
                        return Err(PathError::MissingMoveTo {
                            found: c,
                            position,
                        })
                    }
                    _ => {
                        return Err(PathError::UnexpectedCharacter {
                            character: c,
                            position,
                        })
                    }
                }
            } else {
                return Err(PathError::UnexpectedCharacter {
                    character: c,
                    position,
                });
            };

            if !builder.started && !matches!(cmd, 'M' | 'm') {
                return Err(PathError::MissingMoveTo {
                    found: cmd,
                    position,
                });
            }

            let relative = cmd.is_ascii_lowercase();
            let origin = if relative { builder.last } else { Point::default() };
            let at = |p: Point| if relative { origin + p } else { p };

            match cmd.to_ascii_uppercase() {
                'M' => {
                    let p = lexer.point(cmd)?;
                    builder.move_to(at(p));
                }
                'L' => {
                    let p = lexer.point(cmd)?;
                    builder.line_to(at(p));
                }
                'H' => {
                    let x = lexer.number(cmd)?;
                    let x = if relative { origin.x + x } else { x };
                    builder.line_to(Point::new(x, builder.last.y));
                }
                'V' => {
                    let y = lexer.number(cmd)?;
                    let y = if relative { origin.y + y } else { y };
                    builder.line_to(Point::new(builder.last.x, y));
                }
                'C' => {
                    let c1 = lexer.point(cmd)?;
                    let c2 = lexer.point(cmd)?;
                    let p = lexer.point(cmd)?;
                    builder.cubic_to(at(c1), at(c2), at(p));
                }
                'S' => {
                    let c2 = lexer.point(cmd)?;
                    let p = lexer.point(cmd)?;
                    let c1 = builder.reflected_cubic_control();
                    builder.cubic_to(c1, at(c2), at(p));
                }
                'Q' => {
                    let q = lexer.point(cmd)?;
                    let p = lexer.point(cmd)?;
                    builder.quad_to(at(q), at(p));
                }
                'T' => {
                    let p = lexer.point(cmd)?;
                    let q = builder.reflected_quad_control();
                    builder.quad_to(q, at(p));
                }
                'A' => {
                    let rx = lexer.number(cmd)?;
                    let ry = lexer.number(cmd)?;
                    let rotation = lexer.number(cmd)?;
                    let large_arc = lexer.flag()?;
                    let sweep = lexer.flag()?;
                    let p = lexer.point(cmd)?;
                    builder.arc_to(rx, ry, rotation, large_arc, sweep, at(p));
                }
                'Z' => builder.close(),
                _ => {
                    return Err(PathError::UnexpectedCharacter {
                        character: cmd,
                        position,
                    })
                }
            }

            previous = Some(cmd);
        }

        Ok(builder.finish())
    }
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+')
}

struct Lexer<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.data[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == ',' {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn number(&mut self, command: char) -> Result<f64, PathError> {
        self.skip_separators();
        let rest = &self.data[self.pos..];
        let (value, remainder) = split_number(rest).ok_or(PathError::ExpectedNumber {
            command,
            position: self.pos,
        })?;
        self.pos += rest.len() - remainder.len();
        Ok(value)
    }

    fn point(&mut self, command: char) -> Result<Point, PathError> {
        let x = self.number(command)?;
        let y = self.number(command)?;
        Ok(Point::new(x, y))
    }

    /// Arc flags are a single `0` or `1` and may be written without separators.
    fn flag(&mut self) -> Result<bool, PathError> {
        self.skip_separators();
        let flag = match self.peek() {
            Some('0') => false,
            Some('1') => true,
            _ => return Err(PathError::ExpectedFlag { position: self.pos }),
        };
        self.bump();
        Ok(flag)
    }
}

/// Accumulates nodes the way path commands describe them.
///
/// The node for an anchor is only complete once the segment leaving it is
/// known, so the builder keeps the pending anchor (`last`) and the control
/// point that leads into it (`last_ctrl`).
#[derive(Default)]
struct NodeBuilder {
    subpaths: Vec<Subpath>,
    current: Option<Vec<Node>>,
    started: bool,
    start: Point,
    last: Point,
    last_ctrl: Point,
    prev_cubic_ctrl: Option<Point>,
    prev_quad_ctrl: Option<Point>,
}

impl NodeBuilder {
    fn move_to(&mut self, p: Point) {
        self.flush(false);
        self.current = Some(Vec::new());
        self.started = true;
        self.start = p;
        self.last = p;
        self.last_ctrl = p;
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = None;
    }

    /// Drawing after a closepath starts a new subpath at the closing point.
    fn ensure_subpath(&mut self) {
        if self.current.is_none() {
            self.current = Some(Vec::new());
            self.start = self.last;
            self.last_ctrl = self.last;
        }
    }

    fn push_pending(&mut self, outgoing: Point) {
        let node = Node::new(self.last_ctrl, self.last, outgoing);
        if let Some(nodes) = self.current.as_mut() {
            nodes.push(node);
        }
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_subpath();
        self.push_pending(self.last);
        self.last = p;
        self.last_ctrl = p;
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = None;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.ensure_subpath();
        self.push_pending(c1);
        self.last = p;
        self.last_ctrl = c2;
        self.prev_cubic_ctrl = Some(c2);
        self.prev_quad_ctrl = None;
    }

    fn quad_to(&mut self, q: Point, p: Point) {
        let from = self.last;
        let c1 = from + (q - from) * (2.0 / 3.0);
        let c2 = p + (q - p) * (2.0 / 3.0);
        self.cubic_to(c1, c2, p);
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = Some(q);
    }

    fn reflected_cubic_control(&self) -> Point {
        match self.prev_cubic_ctrl {
            Some(c) => self.last + (self.last - c),
            None => self.last,
        }
    }

    fn reflected_quad_control(&self) -> Point {
        match self.prev_quad_ctrl {
            Some(q) => self.last + (self.last - q),
            None => self.last,
        }
    }

    fn arc_to(&mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, p: Point) {
        let from = self.last;
        if from == p {
            return;
        }
        match arc_to_cubics(from, p, rx, ry, rotation, large_arc, sweep) {
            Some(cubics) => {
                for (c1, c2, to) in cubics {
                    self.cubic_to(c1, c2, to);
                }
            }
            None => self.line_to(p),
        }
        self.prev_cubic_ctrl = None;
    }

    fn close(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.push_pending(self.last);
        if self.last != self.start {
            let closing = Node::corner(self.start);
            if let Some(nodes) = self.current.as_mut() {
                nodes.push(closing);
            }
        }
        if let Some(nodes) = self.current.take() {
            self.subpaths.push(Subpath {
                nodes,
                closed: true,
            });
        }
        self.last = self.start;
        self.last_ctrl = self.start;
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = None;
    }

    /// Complete the open subpath, if any, with its final anchor.
    fn flush(&mut self, closed: bool) {
        if self.current.is_some() {
            self.push_pending(self.last);
            if let Some(nodes) = self.current.take() {
                self.subpaths.push(Subpath { nodes, closed });
            }
        }
    }

    fn finish(mut self) -> SuperPath {
        self.flush(false);
        SuperPath::new(self.subpaths)
    }
}

fn angle_between(u: Point, v: Point) -> f64 {
    let dot = u.x * v.x + u.y * v.y;
    let det = u.x * v.y - u.y * v.x;
    det.atan2(dot)
}

/// Convert an SVG endpoint-parameterised arc into cubic segments.
///
/// Returns `None` when the arc degenerates into a straight line.
fn arc_to_cubics(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<Vec<(Point, Point, Point)>> {
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return None;
    }

    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Endpoint midpoint in the ellipse's rotated frame
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Radii too small to span the endpoints are scaled up
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let denom = rx2 * y1p * y1p + ry2 * x1p * x1p;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let numer = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);

    let mut theta = angle_between(Point::new(1.0, 0.0), u);
    let mut delta = angle_between(u, v);
    if !sweep && delta > 0.0 {
        delta -= std::f64::consts::TAU;
    } else if sweep && delta < 0.0 {
        delta += std::f64::consts::TAU;
    }

    // Tolerance keeps an exact half turn at two pieces despite rounding
    let segments = ((delta.abs() / std::f64::consts::FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
    let step = delta / segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let on_ellipse = |ux: f64, uy: f64| {
        Point::new(
            cx + cos_phi * rx * ux - sin_phi * ry * uy,
            cy + sin_phi * rx * ux + cos_phi * ry * uy,
        )
    };

    let mut cubics = Vec::with_capacity(segments);
    for i in 0..segments {
        let t0 = theta;
        let t1 = theta + step;
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();

        let ctrl1 = on_ellipse(c0 - k * s0, s0 + k * c0);
        let ctrl2 = on_ellipse(c1 + k * s1, s1 - k * c1);
        // Land exactly on the requested endpoint
        let end = if i + 1 == segments {
            to
        } else {
            on_ellipse(c1, s1)
        };

        cubics.push((ctrl1, ctrl2, end));
        theta = t1;
    }

    Some(cubics)
}
