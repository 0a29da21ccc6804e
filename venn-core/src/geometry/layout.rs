use std::{collections::BTreeSet, f64::consts::PI};

use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

use crate::{circle::{circle, Circle}, error::LayoutError, key::SetId, r2::R2};

pub const MIN_CIRCLES: usize = 2;
pub const MAX_CIRCLES: usize = crate::key::MAX_SETS;

/// Centers of the default layout sit this fraction of the radius away from the common centroid.
pub const DEFAULT_OFFSET_RATIO: f64 = 0.7;

/// A validated circle configuration: 2..=4 circles with distinct ids, finite centers and positive radii.
#[derive(Debug, Clone, PartialEq, Deref, IntoIterator, Serialize, Deserialize)]
#[serde(try_from = "Vec<Circle>", into = "Vec<Circle>")]
pub struct Layout(Vec<Circle>);

impl Layout {
    pub fn new(circles: Vec<Circle>) -> Result<Layout, LayoutError> {
        if circles.len() < MIN_CIRCLES || circles.len() > MAX_CIRCLES {
            return Err(LayoutError::CircleCount { count: circles.len(), min: MIN_CIRCLES, max: MAX_CIRCLES });
        }
        let mut ids = BTreeSet::new();
        for c in &circles {
            if !ids.insert(c.id) {
                return Err(LayoutError::DuplicateId(c.id));
            }
            if !c.c.is_finite() {
                return Err(LayoutError::InvalidCenter { id: c.id });
            }
            if !(c.r.is_finite() && c.r > 0.) {
                return Err(LayoutError::InvalidRadius { id: c.id, r: c.r });
            }
        }
        Ok(Layout(circles))
    }

    /// `n` equal circles of radius `r`, centers evenly spaced around `center` at `DEFAULT_OFFSET_RATIO * r`,
    /// the first one straight "up" (towards -y, as on a canvas).
    pub fn symmetric(n: usize, center: R2<f64>, r: f64) -> Result<Layout, LayoutError> {
        let offset = r * DEFAULT_OFFSET_RATIO;
        let circles = SetId::first(n).enumerate().map(|(idx, id)| {
            let theta = -PI / 2. + 2. * PI * (idx as f64) / (n as f64);
            circle(id, center.x + offset * theta.cos(), center.y + offset * theta.sin(), r)
        }).collect();
        Layout::new(circles)
    }

    /// Default 3-circle layout for a `width` × `height` canvas.
    pub fn for_canvas(width: f64, height: f64) -> Result<Layout, LayoutError> {
        let r = width.min(height) / 4.;
        Layout::symmetric(3, R2 { x: width / 2., y: height / 2. }, r)
    }

    pub fn circles(&self) -> &[Circle] {
        &self.0
    }

    pub fn get(&self, id: SetId) -> Option<&Circle> {
        self.0.iter().find(|c| c.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: SetId) -> Option<&mut Circle> {
        self.0.iter_mut().find(|c| c.id == id)
    }

    /// Bitmask of the ids present.
    pub fn universe(&self) -> u8 {
        self.0.iter().fold(0, |bits, c| bits | c.id.bit())
    }
}

impl TryFrom<Vec<Circle>> for Layout {
    type Error = LayoutError;
    fn try_from(circles: Vec<Circle>) -> Result<Self, Self::Error> {
        Layout::new(circles)
    }
}

impl From<Layout> for Vec<Circle> {
    fn from(layout: Layout) -> Vec<Circle> {
        layout.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        let a = circle(SetId::A, 0., 0., 1.);
        let b = circle(SetId::B, 1., 0., 1.);
        assert!(Layout::new(vec![ a, b ]).is_ok());
        assert_eq!(
            Layout::new(vec![ a ]),
            Err(LayoutError::CircleCount { count: 1, min: 2, max: 4 }),
        );
        assert_eq!(Layout::new(vec![ a, a ]), Err(LayoutError::DuplicateId(SetId::A)));
        assert_eq!(
            Layout::new(vec![ a, circle(SetId::B, 0., 0., -1.) ]),
            Err(LayoutError::InvalidRadius { id: SetId::B, r: -1. }),
        );
        assert_eq!(
            Layout::new(vec![ a, circle(SetId::B, f64::NAN, 0., 1.) ]),
            Err(LayoutError::InvalidCenter { id: SetId::B }),
        );
    }

    #[test]
    fn canvas_default() {
        let layout = Layout::for_canvas(800., 600.).unwrap();
        assert_eq!(layout.len(), 3);
        let ids: Vec<SetId> = layout.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ SetId::A, SetId::B, SetId::C ]);
        let centroid = R2::mean(&layout.iter().map(|c| c.c).collect::<Vec<_>>()).unwrap();
        assert_relative_eq!(centroid, R2::new(400., 300.), epsilon = 1e-9);
        for c in layout.iter() {
            assert_relative_eq!(c.r, 150.);
            assert_relative_eq!(c.c.distance(&centroid), 105., epsilon = 1e-9);
        }
        // A on top, B lower right, C lower left
        assert_relative_eq!(layout[0].c, R2::new(400., 195.), epsilon = 1e-9);
        assert!(layout[1].c.x > 400. && layout[1].c.y > 300.);
        assert!(layout[2].c.x < 400. && layout[2].c.y > 300.);
        assert_eq!(layout.universe(), 0b111);
    }

    #[test]
    fn serde_validates() {
        let json = r#"[{"id":"A","c":{"x":0,"y":0},"r":1},{"id":"B","c":{"x":1,"y":0},"r":1}]"#;
        let layout: Layout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.get(SetId::B).unwrap().c, R2::new(1., 0.));
        let json = r#"[{"id":"A","c":{"x":0,"y":0},"r":1}]"#;
        assert!(serde_json::from_str::<Layout>(json).is_err());
    }
}
