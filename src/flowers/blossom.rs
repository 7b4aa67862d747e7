use std::f64::consts::TAU;

use kurbo::{Point, Vec2};
use rand::Rng;

use super::draw_dot;
use crate::{color::Rgba8, flower::FlowerState, surface::Surface2d};

const CENTER_PINK: Rgba8 = Rgba8::opaque(0xff, 0xe8, 0xe8);
const CENTER_OUTLINE: Rgba8 = Rgba8::opaque(0xe4, 0xdc, 0xdc);
const CENTER_OUTLINE_WIDTH: f64 = 0.5;

/// The default simple round-petaled flower: overlapping petal circles fused
/// into a single fill, topped by an outlined light-pink center dot.
#[derive(Clone, Copy, Debug)]
pub struct Blossom {
    disc_size: f64,
    petal_count: u32,
    petal_angle: f64,
}

impl Blossom {
    pub fn new(rng: &mut impl Rng) -> Self {
        let petal_count = rng.random_range(4..=6);
        Self {
            disc_size: 8.0,
            petal_count,
            petal_angle: TAU / f64::from(petal_count),
        }
    }

    pub fn petal_count(&self) -> u32 {
        self.petal_count
    }

    fn render_petals(&self, surface: &mut dyn Surface2d, state: &FlowerState, stem_end: Point) {
        let radius = self.disc_size * 1.8;
        let color = state.petal_color().to_rgba8();

        surface.begin_path();
        surface.set_fill_color(color);
        for i in 0..self.petal_count {
            let angle = f64::from(i) * self.petal_angle + state.angle_offset();
            let center = stem_end + Vec2::new(angle.cos(), angle.sin()) * (radius * 0.5);
            surface.arc(center, radius * state.current_scale(), 0.0, TAU);
        }
        surface.fill();
        surface.close_path();
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface2d, state: &FlowerState, _wind: f64) {
        let stem = state.stem_data();
        self.render_petals(surface, state, stem.end);
        draw_dot(
            surface,
            stem.end,
            self.disc_size * state.current_scale(),
            CENTER_PINK,
        );
        // Thin outline around the dot path draw_dot leaves current.
        surface.set_stroke_color(CENTER_OUTLINE);
        surface.set_line_width(CENTER_OUTLINE_WIDTH);
        surface.stroke();
    }
}
