use std::f64::consts::TAU;

use kurbo::{Point, Vec2};
use rand::Rng;

use super::draw_dot;
use crate::{color::Rgba8, flower::FlowerState, surface::Surface2d};

const DISC_OUTER: Rgba8 = Rgba8::opaque(0xed, 0xe6, 0x25);
const DISC_INNER: Rgba8 = Rgba8::opaque(0xe4, 0xde, 0x25);

/// Radial stroked petals with rounded tips around a two-tone disc eye.
#[derive(Clone, Copy, Debug)]
pub struct Daisy {
    disc_size: f64,
    petal_count: u32,
    petal_angle: f64,
}

impl Daisy {
    pub fn new(rng: &mut impl Rng) -> Self {
        let petal_count = rng.random_range(8..=12);
        Self {
            disc_size: 8.0,
            petal_count,
            petal_angle: TAU / f64::from(petal_count),
        }
    }

    pub fn petal_count(&self) -> u32 {
        self.petal_count
    }

    fn render_petals(&self, surface: &mut dyn Surface2d, state: &FlowerState, center: Point) {
        let radius = self.disc_size * 2.5;
        let size = radius * state.current_scale();
        let roundness = radius * 0.4 * state.current_scale();
        let color = state.petal_color().to_rgba8();

        for i in 0..self.petal_count {
            let angle = f64::from(i) * self.petal_angle + state.angle_offset();
            let end = center + Vec2::new(angle.cos(), angle.sin()) * size;

            surface.begin_path();
            surface.move_to(center);
            surface.set_stroke_color(color);
            surface.set_line_width(roundness);
            surface.line_to(end);
            surface.close_path();
            surface.stroke();

            // Rounded petal tip.
            draw_dot(surface, end, roundness * 0.5, color);
        }
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface2d, state: &FlowerState, _wind: f64) {
        let stem = state.stem_data();
        self.render_petals(surface, state, stem.end);
        draw_dot(
            surface,
            stem.end,
            self.disc_size * state.current_scale(),
            DISC_OUTER,
        );
        draw_dot(
            surface,
            stem.end,
            self.disc_size * state.current_scale() * 0.7,
            DISC_INNER,
        );
    }
}
