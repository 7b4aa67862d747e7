mod blossom;
mod daisy;
mod tulip;

pub use blossom::Blossom;
pub use daisy::Daisy;
pub use tulip::Tulip;

use kurbo::Point;
use rand::Rng;

use crate::{color::Rgba8, flower::FlowerState, surface::Surface2d};

/// The closed set of flower head shapes. Variants differ only in head
/// geometry; growth and sway live in [`FlowerState`].
#[derive(Clone, Copy, Debug)]
pub enum Head {
    Daisy(Daisy),
    Blossom(Blossom),
    Tulip(Tulip),
}

impl Head {
    /// Uniform random variant with freshly drawn shape parameters.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => Self::Daisy(Daisy::new(rng)),
            1 => Self::Blossom(Blossom::new(rng)),
            _ => Self::Tulip(Tulip::new(rng)),
        }
    }

    /// Draw the head attached at the stem tip. Called after the stem.
    pub(crate) fn render(&self, surface: &mut dyn Surface2d, state: &FlowerState, wind: f64) {
        match self {
            Self::Daisy(head) => head.render(surface, state, wind),
            Self::Blossom(head) => head.render(surface, state, wind),
            Self::Tulip(head) => head.render(surface, state, wind),
        }
    }
}

/// Filled dot, the small building block the round-petaled heads share.
pub(crate) fn draw_dot(surface: &mut dyn Surface2d, center: Point, radius: f64, color: Rgba8) {
    surface.begin_path();
    surface.arc(center, radius, 0.0, std::f64::consts::TAU);
    surface.set_fill_color(color);
    surface.fill();
    surface.close_path();
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::flower::Flower;

    #[derive(Default)]
    struct CountingSurface {
        fills: usize,
        strokes: usize,
    }

    impl Surface2d for CountingSurface {
        fn width(&self) -> u32 {
            0
        }
        fn height(&self) -> u32 {
            0
        }
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn begin_path(&mut self) {}
        fn close_path(&mut self) {}
        fn move_to(&mut self, _p: Point) {}
        fn line_to(&mut self, _p: Point) {}
        fn bezier_curve_to(&mut self, _c1: Point, _c2: Point, _end: Point) {}
        fn arc(&mut self, _center: Point, _radius: f64, _start: f64, _end: f64) {}
        fn set_fill_color(&mut self, _color: Rgba8) {}
        fn set_stroke_color(&mut self, _color: Rgba8) {}
        fn set_line_width(&mut self, _width: f64) {}
        fn fill(&mut self) {
            self.fills += 1;
        }
        fn stroke(&mut self) {
            self.strokes += 1;
        }
        fn clear_rect(&mut self, _rect: Rect) {}
    }

    fn rendered_counts(head: Head) -> CountingSurface {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut flower = Flower::new(Point::new(50.0, 100.0), head, &mut rng);
        let mut surface = CountingSurface::default();
        flower.render(&mut surface, Point::new(-1000.0, -1000.0), 0.0);
        surface
    }

    #[test]
    fn random_covers_all_variants() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (mut daisies, mut blossoms, mut tulips) = (0, 0, 0);
        for _ in 0..300 {
            match Head::random(&mut rng) {
                Head::Daisy(_) => daisies += 1,
                Head::Blossom(_) => blossoms += 1,
                Head::Tulip(_) => tulips += 1,
            }
        }
        assert!(daisies > 0);
        assert!(blossoms > 0);
        assert!(tulips > 0);
    }

    #[test]
    fn daisy_draws_one_stroke_and_one_dot_per_petal() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let daisy = Daisy::new(&mut rng);
        let petals = daisy.petal_count() as usize;
        let counts = rendered_counts(Head::Daisy(daisy));
        // Stem stroke + one stroked line per petal.
        assert_eq!(counts.strokes, 1 + petals);
        // Tip dot per petal + two disc fills.
        assert_eq!(counts.fills, petals + 2);
    }

    #[test]
    fn blossom_fuses_petals_into_one_fill() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let blossom = Blossom::new(&mut rng);
        let counts = rendered_counts(Head::Blossom(blossom));
        // Petal union + center dot.
        assert_eq!(counts.fills, 2);
        // Stem stroke + center dot outline.
        assert_eq!(counts.strokes, 2);
    }

    #[test]
    fn tulip_draws_three_petals() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let tulip = Tulip::new(&mut rng);
        let counts = rendered_counts(Head::Tulip(tulip));
        assert_eq!(counts.fills, 3);
        assert_eq!(counts.strokes, 1); // stem only
    }
}
