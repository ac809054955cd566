//! Polygon contours as delivered by a border-following segmenter.
//!
//! Area uses the shoelace formula.  The steering point is the centre of the
//! minimum enclosing circle, which is less sensitive to ragged edges on one
//! side of the blob than the vertex centroid.

use super::{Point2D, Region};

/// Relative slack when testing whether a point lies inside a circle.
const CONTAINS_EPSILON: f64 = 1e-9;

/// Closed polygon; the last vertex connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    points: Vec<Point2D>,
}

impl Contour {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Unsigned polygon area.  Fewer than three vertices enclose nothing.
    pub fn polygon_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }

    pub fn enclosing_circle(&self) -> Option<Circle> {
        min_enclosing_circle(&self.points)
    }
}

impl From<Vec<Point2D>> for Contour {
    fn from(points: Vec<Point2D>) -> Self {
        Self::new(points)
    }
}

impl Region for Contour {
    fn area(&self) -> f64 {
        self.polygon_area()
    }

    fn center(&self) -> Point2D {
        self.enclosing_circle()
            .map_or(Point2D::new(f64::NAN, f64::NAN), |c| c.center)
    }
}

// ---------------------------------------------------------------------------
// Minimum enclosing circle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle {
    fn contains(&self, p: &Point2D) -> bool {
        let slack = CONTAINS_EPSILON * self.radius.max(1.0);
        self.center.distance(p) <= self.radius + slack
    }

    fn from_diameter(a: Point2D, b: Point2D) -> Self {
        let center = Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Self {
            center,
            radius: center.distance(&a),
        }
    }

    /// Circumcircle; collinear triples fall back to the widest pair.
    fn from_triangle(a: Point2D, b: Point2D, c: Point2D) -> Self {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < f64::EPSILON {
            let pairs = [(a, b), (a, c), (b, c)];
            return pairs
                .into_iter()
                .map(|(p, q)| Self::from_diameter(p, q))
                .fold(Self::from_diameter(a, a), |widest, c| {
                    if c.radius > widest.radius { c } else { widest }
                });
        }
        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
        let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
        let center = Point2D::new(ux, uy);
        Self {
            center,
            radius: center.distance(&a),
        }
    }
}

/// Incremental Welzl construction over the convex hull of `points`.
/// `None` for an empty or non-finite set.
pub fn min_enclosing_circle(points: &[Point2D]) -> Option<Circle> {
    enclose(points).map(|(circle, _)| circle)
}

/// The circle plus the number of containment tests it took.
fn enclose(points: &[Point2D]) -> Option<(Circle, usize)> {
    if points.is_empty() || !points.iter().all(Point2D::is_finite) {
        return None;
    }

    // Contours arrive in boundary order, the worst case for the incremental
    // construction; only the hull matters and a shuffle restores the
    // expected linear cost.
    let mut pts = convex_hull(points);
    shuffle(&mut pts);

    let mut checks = 0usize;
    let mut circle = Circle {
        center: pts[0],
        radius: 0.0,
    };
    for i in 1..pts.len() {
        checks += 1;
        if circle.contains(&pts[i]) {
            continue;
        }
        circle = Circle {
            center: pts[i],
            radius: 0.0,
        };
        for j in 0..i {
            checks += 1;
            if circle.contains(&pts[j]) {
                continue;
            }
            circle = Circle::from_diameter(pts[i], pts[j]);
            for k in 0..j {
                checks += 1;
                if !circle.contains(&pts[k]) {
                    circle = Circle::from_triangle(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    Some((circle, checks))
}

fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Andrew's monotone chain.  Collinear and duplicate points are dropped;
/// a set with fewer than three distinct points is returned as is.
fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Point2D> = Vec::with_capacity(sorted.len() + 1);
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Fisher-Yates with a fixed-seed xorshift, so a given contour always
/// yields the same circle.
fn shuffle(points: &mut [Point2D]) {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in (1..points.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let j = (state % (i as u64 + 1)) as usize;
        points.swap(i, j);
    }
}
