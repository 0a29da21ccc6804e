use std::{f64::consts::PI, fmt::Display};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{fmt::Fmt, key::SetId, r2::R2};

/// Relative tolerance used when classifying near-degenerate circle pairs.
pub const REL_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Circle {
    #[tsify(type = "string")]
    pub id: SetId,
    pub c: R2<f64>,
    pub r: f64,
}

pub fn circle(id: SetId, cx: f64, cy: f64, r: f64) -> Circle {
    Circle { id, c: R2 { x: cx, y: cy }, r }
}

/// How two circles sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Disjoint,
    /// Externally tangent: touching at one point, no shared area.
    Tangent,
    Overlapping,
    /// `self` contains the other circle.
    Contains,
    /// `self` lies within the other circle.
    Within,
    Identical,
}

impl Circle {
    pub fn area(&self) -> f64 {
        PI * self.r * self.r
    }
    /// Finite center and finite, positive radius.
    pub fn is_valid(&self) -> bool {
        self.c.is_finite() && self.r.is_finite() && self.r > 0.
    }
    pub fn contains(&self, p: &R2<f64>) -> bool {
        (*p - self.c).norm2() <= self.r * self.r
    }
    /// Axis-aligned bounds as `(min, max)` corners.
    pub fn bounds(&self) -> (R2<f64>, R2<f64>) {
        (
            R2 { x: self.c.x - self.r, y: self.c.y - self.r },
            R2 { x: self.c.x + self.r, y: self.c.y + self.r },
        )
    }
    /// Point on the perimeter at angle `theta`.
    pub fn point(&self, theta: f64) -> R2<f64> {
        R2 {
            x: self.c.x + self.r * theta.cos(),
            y: self.c.y + self.r * theta.sin(),
        }
    }
    /// Outward unit normal at `p` (which is expected to lie on the perimeter).
    pub fn normal(&self, p: &R2<f64>) -> Option<R2<f64>> {
        (*p - self.c).unit()
    }
    fn tolerance(&self, o: &Circle) -> f64 {
        REL_EPSILON * self.r.max(o.r).max(1.)
    }
    /// Perimeter intersection points with another circle: none, one (tangent) or two.
    ///
    /// Coincident centers never intersect (there is no well-defined point set, and the formula would
    /// divide by the center distance).
    pub fn intersections(&self, o: &Circle) -> Vec<R2<f64>> {
        let delta = o.c - self.c;
        let d = delta.norm();
        let tol = self.tolerance(o);
        if !d.is_finite() || d <= tol {
            return vec![];
        }
        let (r0, r1) = (self.r, o.r);
        if d > r0 + r1 + tol || d < (r0 - r1).abs() - tol {
            return vec![];
        }
        let u = delta / d;
        let a = (r0 * r0 - r1 * r1 + d * d) / (2. * d);
        let h2 = r0 * r0 - a * a;
        let base = self.c + u * a;
        if h2 <= tol * tol {
            return vec![ base ];
        }
        let h = h2.sqrt();
        let perp = R2 { x: -u.y, y: u.x };
        vec![ base + perp * h, base - perp * h ]
    }
    pub fn relation(&self, o: &Circle) -> Relation {
        let d = self.c.distance(&o.c);
        let tol = self.tolerance(o);
        if d <= tol && (self.r - o.r).abs() <= tol {
            Relation::Identical
        } else if (d - (self.r + o.r)).abs() <= tol {
            Relation::Tangent
        } else if d > self.r + o.r {
            Relation::Disjoint
        } else if d + o.r <= self.r + tol {
            Relation::Contains
        } else if d + self.r <= o.r + tol {
            Relation::Within
        } else {
            Relation::Overlapping
        }
    }
    /// Whether the circles share area or at least touch, allowing a slack of `epsilon`.
    pub fn touches(&self, o: &Circle, epsilon: f64) -> bool {
        self.c.distance(&o.c) <= self.r + o.r + epsilon
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {}, {})", self.id, self.c.x.s(3), self.c.y.s(3), self.r.s(3))
    }
}
