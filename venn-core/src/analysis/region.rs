use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{key::Key, r2::R2};

/// One non-empty cell of a circle arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[tsify(type = "string")]
    pub key: Key,
    /// Representative point, inside the region whenever the region isn't degenerate.
    pub center: R2<f64>,
    /// Sampled area estimate (samples × step²); `None` when extracted analytically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub area: Option<f64>,
    /// Grid points that landed in this region (0 when extracted analytically).
    #[serde(default)]
    pub samples: usize,
    /// Member grid points, only collected on request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[tsify(optional)]
    pub points: Vec<R2<f64>>,
}

impl Region {
    pub fn new(key: Key, center: R2<f64>) -> Region {
        Region { key, center, area: None, samples: 0, points: vec![] }
    }
    pub fn len(&self) -> usize {
        self.key.len()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.center)?;
        if let Some(area) = self.area {
            write!(f, " ({:.1}, {} samples)", area, self.samples)?;
        }
        Ok(())
    }
}
