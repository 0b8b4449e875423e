use crate::geometry::curve::{Arc, Curve};
use crate::math::{Point2, TOLERANCE};

/// A polyline vertex carrying the bulge of the segment that leaves it.
///
/// The bulge is `tan(sweep / 4)` of that segment: zero for a straight
/// segment, positive when the arc turns counter-clockwise, negative when it
/// turns clockwise, and `±1` for a half circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub point: Point2,
    pub bulge: f64,
}

impl PlineVertex {
    #[must_use]
    pub fn new(point: Point2, bulge: f64) -> Self {
        Self { point, bulge }
    }
}

/// Bulge-encoded polyline, the common exchange format for arc paths
/// (DXF `LWPOLYLINE`, CNC controllers).
///
/// When `closed` is set, the last vertex is joined back to the first using
/// the last vertex's bulge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Creates a polyline of straight segments through `points`.
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        Self {
            vertices: points.iter().map(|p| PlineVertex::new(*p, 0.0)).collect(),
            closed,
        }
    }

    /// Creates an open polyline that follows `arcs` in order.
    ///
    /// Each arc adds its start point with its bulge, and the end point of the
    /// last arc terminates the list. Consecutive arcs must share endpoints.
    #[must_use]
    pub fn from_arcs<'a>(arcs: impl IntoIterator<Item = &'a Arc>) -> Self {
        let mut vertices: Vec<PlineVertex> = Vec::new();
        let mut end = None;
        for arc in arcs {
            vertices.push(PlineVertex::new(*arc.start(), arc.bulge()));
            end = Some(*arc.end());
        }
        vertices.extend(end.map(|p| PlineVertex::new(p, 0.0)));
        Self {
            vertices,
            closed: false,
        }
    }

    /// Number of segments, counting the closing segment of a closed polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Iterates over the segments as arcs; zero-bulge segments are straight.
    pub fn segments(&self) -> impl Iterator<Item = Arc> + '_ {
        let n = self.vertices.len();
        (0..self.segment_count()).map(move |i| {
            let from = self.vertices[i];
            let to = self.vertices[(i + 1) % n];
            Arc::from_bulge(from.point, to.point, from.bulge)
        })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|arc| arc.length()).sum()
    }

    /// Flattens the polyline into points.
    ///
    /// Arcs are replaced by chords that stay within `tolerance` of the arc.
    /// A closed polyline repeats its first point at the end.
    #[must_use]
    pub fn to_points(&self, tolerance: f64) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.vertices.len() * 2);
        for arc in self.segments() {
            if points.is_empty() {
                points.push(*arc.start());
            }
            let chords = chord_count(&arc, tolerance);
            points.extend((1..chords).map(|i| arc.point_at(f64::from(i) / f64::from(chords))));
            points.push(*arc.end());
        }
        points
    }

    /// Returns the same path traversed backwards.
    ///
    /// Vertex order flips and every bulge moves to the other end of its
    /// segment with its sign negated.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let n = self.vertices.len();
        let vertices = (0..n)
            .rev()
            .map(|i| {
                // Vertex i now leads back to vertex i - 1.
                let bulge = match i.checked_sub(1) {
                    Some(prev) => -self.vertices[prev].bulge,
                    None if self.closed => -self.vertices[n - 1].bulge,
                    None => 0.0,
                };
                PlineVertex::new(self.vertices[i].point, bulge)
            })
            .collect();
        Self {
            vertices,
            closed: self.closed,
        }
    }
}

/// Upper bound on chords per arc when flattening.
const MAX_CHORDS: u32 = 1 << 16;

/// Chords needed so that none strays more than `tolerance` from `arc`.
fn chord_count(arc: &Arc, tolerance: f64) -> u32 {
    let sweep = arc.sweep_angle().abs();
    if arc.is_straight() || sweep < TOLERANCE || tolerance <= 0.0 {
        return 1;
    }
    // A chord spanning angle θ has sagitta r·(1 − cos(θ/2)).
    let max_step = 2.0 * (1.0 - tolerance / arc.radius()).max(-1.0).acos();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (sweep / max_step).ceil() as u32;
    count.clamp(1, MAX_CHORDS)
}
