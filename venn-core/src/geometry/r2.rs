use std::{ops::{Sub, Mul, Add, Div, Neg}, fmt::{Display, Formatter, self}};
use approx::{AbsDiffEq, RelativeEq};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::fmt::Fmt;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

impl<D: Fmt> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x.s(3), self.y.s(3))
    }
}

impl R2<f64> {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }
    pub fn dot(&self, o: &R2<f64>) -> f64 {
        self.x * o.x + self.y * o.y
    }
    pub fn distance(&self, o: &R2<f64>) -> f64 {
        (*self - *o).norm()
    }
    /// Unit vector in this direction, `None` for (near-)zero vectors.
    pub fn unit(&self) -> Option<R2<f64>> {
        let n = self.norm();
        if n > f64::EPSILON && n.is_finite() {
            Some(*self / n)
        } else {
            None
        }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    /// Arithmetic mean; `None` for an empty slice.
    pub fn mean(points: &[R2<f64>]) -> Option<R2<f64>> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let sum = points.iter().fold(R2::default(), |acc, p| acc + *p);
        Some(sum / n)
    }
}

impl AbsDiffEq for R2<f64> {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2<f64> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl<D: Add<Output = D>> Add for R2<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<D: Neg<Output = D>> Neg for R2<D> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        R2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<D: Mul<D, Output = D> + Clone> Mul<D> for R2<D> {
    type Output = Self;
    fn mul(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}

impl<D: Div<D, Output = D> + Clone> Div<D> for R2<D> {
    type Output = Self;
    fn div(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x / rhs.clone(),
            y: self.y / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops() {
        let a = R2::new(3., 4.);
        let b = R2::new(1., -1.);
        assert_eq!(a + b, R2::new(4., 3.));
        assert_eq!(a - b, R2::new(2., 5.));
        assert_eq!(-b, R2::new(-1., 1.));
        assert_eq!(a * 2., R2::new(6., 8.));
        assert_eq!(a / 2., R2::new(1.5, 2.));
        assert_eq!(a.norm(), 5.);
        assert_eq!(a.dot(&b), -1.);
        assert_eq!(format!("{}", b), "( 1.000, -1.000)");
    }

    #[test]
    fn unit_and_mean() {
        assert_relative_eq!(R2::new(0., 2.).unit().unwrap(), R2::new(0., 1.));
        assert_eq!(R2::new(0., 0.).unit(), None);
        assert_eq!(R2::mean(&[]), None);
        assert_relative_eq!(
            R2::mean(&[ R2::new(0., 0.), R2::new(2., 0.), R2::new(1., 3.) ]).unwrap(),
            R2::new(1., 1.),
        );
    }
}
