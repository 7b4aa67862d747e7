use kurbo::{Point, Rect};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{config::Viewport, flower::Flower, flowers::Head, surface::Surface2d};

/// Viewport pixels per flower; the population target is one flower per this
/// many pixels of width.
pub const FLOWER_SPACING: f64 = 30.0;
/// Fraction of the viewport width kept flower-free at each edge.
const EDGE_MARGIN_FRAC: f64 = 0.05;
/// Wind phase advance per frame.
const WIND_STEP: f64 = 0.01;
/// Peak horizontal wind offset.
const WIND_AMPLITUDE: f64 = 5.0;

/// The flower population and the global animation signals driving it.
///
/// Collection order is draw order (back to front). The wind phase is owned
/// here, so independent fields animate independently.
pub struct Field {
    flowers: Vec<Flower>,
    pointer: Point,
    width: f64,
    height: f64,
    phase: f64,
    rng: ChaCha8Rng,
}

impl Field {
    /// Build a field populated for `viewport`.
    pub fn new(viewport: Viewport, rng: ChaCha8Rng) -> Self {
        let mut field = Self {
            flowers: Vec::new(),
            pointer: Point::ORIGIN,
            width: viewport.width,
            height: viewport.height,
            phase: 0.0,
            rng,
        };
        field.repopulate();
        field
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn wind_phase(&self) -> f64 {
        self.phase
    }

    /// Update dimensions. Takes effect immediately; adjusting the population
    /// to the new width is a separate (typically debounced) [`repopulate`]
    /// call.
    ///
    /// [`repopulate`]: Self::repopulate
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
    }

    /// How many flowers the current width calls for.
    pub fn target_count(&self) -> usize {
        (self.width / FLOWER_SPACING).floor().max(0.0) as usize
    }

    /// Match the population to the viewport: append the shortfall spread
    /// over the usable width with per-slot jitter, or drop the excess from
    /// the end, then re-root every survivor to the current ground line.
    pub fn repopulate(&mut self) {
        let target = self.target_count();
        let current = self.flowers.len();

        if target > current {
            let shortfall = target - current;
            let margin = self.width * EDGE_MARGIN_FRAC;
            let slot = (self.width - margin * 2.0) / shortfall as f64;
            for i in 0..shortfall {
                let x = slot * i as f64 + self.rng.random::<f64>() * slot + margin;
                let head = Head::random(&mut self.rng);
                self.flowers
                    .push(Flower::new(Point::new(x, self.height), head, &mut self.rng));
            }
        } else {
            self.flowers.truncate(target);
        }

        for flower in &mut self.flowers {
            flower.set_position(None, Some(self.height));
        }
    }

    /// Advance the wind phase, clear the surface, and draw every flower with
    /// the shared wind offset and the current pointer position.
    pub fn frame(&mut self, surface: &mut dyn Surface2d) {
        let wind = self.phase.sin() * WIND_AMPLITUDE;
        self.phase += WIND_STEP;

        surface.clear_rect(Rect::new(0.0, 0.0, self.width, self.height));

        let pointer = self.pointer;
        for flower in &mut self.flowers {
            flower.render(surface, pointer, wind);
        }
    }

    /// First flower (in draw order) whose click range contains `point`.
    pub fn flower_at(&self, point: Point) -> Option<&Flower> {
        self.flowers.iter().find(|f| f.is_in_click_range(point))
    }
}
