use crate::{circle::Circle, key::Key, r2::R2};

/// Full membership signature of a point: bit `id` is set iff circle `id` contains it.
///
/// Circles with degenerate geometry (see [`Circle::is_valid`]) contain nothing.
pub fn membership(circles: &[Circle], p: &R2<f64>) -> u8 {
    circles
        .iter()
        .filter(|c| c.is_valid() && c.contains(p))
        .fold(0, |bits, c| bits | c.id.bit())
}

/// Whether `p` lies in exactly the region named by `key`: inside every member circle, outside all others.
pub fn in_region(circles: &[Circle], key: Key, p: &R2<f64>) -> bool {
    membership(circles, p) == key.bits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circle::circle, key::SetId};

    #[test]
    fn signatures() {
        let circles = [
            circle(SetId::A, 0., 0., 10.),
            circle(SetId::B, 15., 0., 10.),
        ];
        assert_eq!(membership(&circles, &R2::new(-5., 0.)), 0b01);
        assert_eq!(membership(&circles, &R2::new(7.5, 0.)), 0b11);
        assert_eq!(membership(&circles, &R2::new(20., 0.)), 0b10);
        assert_eq!(membership(&circles, &R2::new(100., 0.)), 0);
        // boundary counts as inside
        assert_eq!(membership(&circles, &R2::new(10., 0.)), 0b11);
        let ab: Key = "AB".parse().unwrap();
        assert!(in_region(&circles, ab, &R2::new(7.5, 0.)));
        assert!(!in_region(&circles, ab, &R2::new(-5., 0.)));
    }

    #[test]
    fn invalid_circles_contain_nothing() {
        let circles = [
            circle(SetId::A, 0., 0., 10.),
            circle(SetId::B, 0., 0., 0.),
        ];
        assert_eq!(membership(&circles, &R2::new(0., 0.)), 0b01);
    }
}
