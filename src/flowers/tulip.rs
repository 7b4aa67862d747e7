use kurbo::Point;
use rand::Rng;

use crate::{flower::FlowerState, geom, surface::Surface2d};

const PETAL_WIDTH: f64 = 30.0;
const PETAL_ASPECT: f64 = 1.33;

/// Three overlapping cup-shaped petals built from mirrored Bezier pairs.
/// The petal tips track the live wind value, so tulips visibly flutter
/// beyond the shared stem motion.
#[derive(Clone, Copy, Debug)]
pub struct Tulip {
    petal_width: f64,
    petal_height: f64,
    tilt_deg: f64,
}

impl Tulip {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            petal_width: PETAL_WIDTH,
            petal_height: PETAL_WIDTH * PETAL_ASPECT,
            tilt_deg: f64::from(rng.random_range(15_i32..=20)),
        }
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    /// One petal in local coordinates with the pivot at the origin, rotated
    /// by `angle` and translated so the pivot lands on `center`.
    fn draw_petal(
        surface: &mut dyn Surface2d,
        width: f64,
        height: f64,
        center: Point,
        angle: f64,
        wind: f64,
    ) {
        let place =
            |p: Point| -> Point { center + geom::rotate_point(p, angle).to_vec2() };

        let bottom = place(Point::ORIGIN);
        let cp_right = place(Point::new(width * 0.83, 0.0));
        let cp_left = place(Point::new(-width * 0.83, 0.0));
        let top = place(Point::new(wind, -height * 0.75));

        surface.begin_path();
        surface.move_to(bottom);
        surface.bezier_curve_to(bottom, cp_right, top);
        surface.move_to(bottom);
        surface.bezier_curve_to(bottom, cp_left, top);
        surface.fill();
        surface.close_path();
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface2d, state: &FlowerState, wind: f64) {
        let stem = state.stem_data();
        let center = stem.end;
        let width = self.petal_width * state.current_scale();
        let height = self.petal_height * state.current_scale();
        let tilt = self.tilt_deg.to_radians();

        surface.set_fill_color(state.petal_color().to_rgba8());
        Self::draw_petal(surface, width, height, center, tilt, wind);

        surface.set_fill_color(state.petal_color().darken(3.0).to_rgba8());
        Self::draw_petal(
            surface,
            width,
            height,
            Point::new(center.x, center.y - 5.0),
            0.0,
            wind,
        );

        surface.set_fill_color(state.petal_color().darken(5.0).to_rgba8());
        Self::draw_petal(surface, width, height, center, -tilt, wind);
    }
}
