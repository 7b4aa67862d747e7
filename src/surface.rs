use kurbo::{Point, Rect};

use crate::{
    color::Rgba8,
    config::{Options, Viewport},
    error::FloraResult,
};

/// The drawing contract the flower field needs from a surface.
///
/// Semantics follow immediate-mode canvas conventions: path verbs accumulate
/// into a current path that persists across `fill`/`stroke` until the next
/// `begin_path`, and paint state (fill color, stroke color, line width)
/// applies to whatever is drawn after it is set.
pub trait Surface2d {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reallocate the pixel store to the given dimensions.
    fn resize(&mut self, width: u32, height: u32);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point);

    /// Append a circular arc around `center`. A sweep of a full turn or more
    /// appends a whole circle.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    fn set_fill_color(&mut self, color: Rgba8);
    fn set_stroke_color(&mut self, color: Rgba8);
    fn set_line_width(&mut self, width: f64);

    fn fill(&mut self);
    fn stroke(&mut self);

    /// Reset the pixels under `rect` to fully transparent.
    fn clear_rect(&mut self, rect: Rect);
}

/// Acquires the surface a runtime draws on.
///
/// Host-facing implementations resolve [`Options::container`] /
/// [`Options::surface_id`] against whatever the host environment offers; an
/// identifier that resolves to nothing is a fatal
/// [`FloraError::Config`](crate::FloraError) and construction must not
/// proceed.
pub trait SurfaceProvider {
    fn acquire(
        &mut self,
        options: &Options,
        viewport: Viewport,
    ) -> FloraResult<Box<dyn Surface2d>>;
}
