//! Interactive puzzle state: the player's circles, the target, and the current grab.

use derive_more::Display;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    circle::Circle,
    config::Config,
    error::LayoutError,
    key::SetId,
    layout::Layout,
    r2::R2,
    structure::Structure,
    target,
};

/// Pointer distance from a rim (in canvas pixels) that still counts as grabbing the rim.
pub const EDGE_GRAB_TOLERANCE: f64 = 10.;
pub const MIN_RADIUS: f64 = 10.;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Canvas {
        Canvas { width, height }
    }
}

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    #[display(fmt = "idle")]
    Idle,
    #[display(fmt = "interacting")]
    Interacting,
    /// Terminal until [`Session::reset`].
    #[display(fmt = "matched")]
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grab {
    /// Translate circle `id`; `offset` is the pointer's position relative to its center.
    Move { id: SetId, offset: R2<f64> },
    /// Resize circle `id` so its rim follows the pointer.
    Scale { id: SetId },
}

impl Grab {
    pub fn id(&self) -> SetId {
        match self {
            Grab::Move { id, .. } | Grab::Scale { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Snapshot {
    pub current: Structure,
    pub target: Structure,
    pub matched: bool,
    pub phase: Phase,
}

pub struct Session {
    canvas: Canvas,
    config: Config,
    current: Layout,
    target: Vec<Circle>,
    target_structure: Structure,
    phase: Phase,
    grab: Option<Grab>,
    rng: StdRng,
}

impl Session {
    /// Default layout for `canvas`, and a target generated from it with an RNG seeded by `seed`.
    pub fn new(canvas: Canvas, config: Config, seed: u64) -> Result<Session, LayoutError> {
        let current = Layout::for_canvas(canvas.width, canvas.height)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let target = target::generate(&current, &mut rng, &config);
        Ok(Session::with_circles(canvas, config, current, target, rng))
    }

    /// Session over explicit current and target circles.
    pub fn with_circles(canvas: Canvas, config: Config, current: Layout, target: Vec<Circle>, rng: StdRng) -> Session {
        let target_structure = Structure::new(&target, &config);
        debug!("Target: {}", target_structure.graph);
        Session {
            canvas,
            config,
            current,
            target,
            target_structure,
            phase: Phase::Idle,
            grab: None,
            rng,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn current(&self) -> &[Circle] {
        &self.current
    }
    pub fn target(&self) -> &[Circle] {
        &self.target
    }
    pub fn target_structure(&self) -> &Structure {
        &self.target_structure
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn grabbed(&self) -> Option<Grab> {
        self.grab
    }

    /// Hit-test circles in order: near a rim scales, inside moves. Ignored once matched.
    pub fn grab(&mut self, p: R2<f64>) -> Option<Grab> {
        if self.phase == Phase::Matched {
            return None;
        }
        self.grab = self.current.iter().find_map(|c| {
            let d = c.c.distance(&p);
            if (d - c.r).abs() <= EDGE_GRAB_TOLERANCE {
                Some(Grab::Scale { id: c.id })
            } else if d < c.r {
                Some(Grab::Move { id: c.id, offset: p - c.c })
            } else {
                None
            }
        });
        if let Some(grab) = self.grab {
            debug!("Grabbed {:?} at {}", grab, p);
        }
        self.grab
    }

    /// Apply the current grab at pointer position `p`, returning the re-evaluated state.
    pub fn drag(&mut self, p: R2<f64>) -> Option<Snapshot> {
        if self.phase == Phase::Matched {
            return None;
        }
        let grab = self.grab?;
        let c = self.current.get_mut(grab.id())?;
        match grab {
            Grab::Move { offset, .. } => c.c = p - offset,
            Grab::Scale { .. } => c.r = c.c.distance(&p).max(MIN_RADIUS),
        }
        self.phase = Phase::Interacting;
        Some(self.evaluate())
    }

    pub fn release(&mut self) -> Snapshot {
        self.grab = None;
        self.evaluate()
    }

    /// Recompute the current structure and compare it with the target's.
    pub fn evaluate(&mut self) -> Snapshot {
        let current = Structure::new(&self.current, &self.config);
        let matched = current.matches(&self.target_structure, self.config.rule);
        if matched && self.phase != Phase::Matched {
            info!("Matched target: {}", current.graph);
            self.phase = Phase::Matched;
            self.grab = None;
        }
        Snapshot {
            current,
            target: self.target_structure.clone(),
            matched,
            phase: self.phase,
        }
    }

    /// Default layout for the (possibly resized) canvas, and a fresh target.
    pub fn reset(&mut self) -> Result<(), LayoutError> {
        self.current = Layout::for_canvas(self.canvas.width, self.canvas.height)?;
        self.target = target::generate(&self.current, &mut self.rng, &self.config);
        self.target_structure = Structure::new(&self.target, &self.config);
        self.phase = Phase::Idle;
        self.grab = None;
        debug!("Reset; target: {}", self.target_structure.graph);
        Ok(())
    }

    /// Takes effect on the next [`Session::reset`].
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }
}
