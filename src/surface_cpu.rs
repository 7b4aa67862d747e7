use kurbo::{Arc, BezPath, Cap, Circle, Join, PathEl, Point, Rect, Shape, Stroke, StrokeOpts};

use crate::{
    color::Rgba8,
    config::{Options, Viewport},
    error::{FloraError, FloraResult},
    surface::{Surface2d, SurfaceProvider},
};

/// Curve flattening tolerance for arcs and stroke expansion, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// CPU-rasterized [`Surface2d`] backed by a `vello_cpu` pixmap.
///
/// Pixel data is premultiplied RGBA8. Each `fill`/`stroke` rasterizes
/// through a short-lived render context composited onto the pixmap, so the
/// surface accumulates draw calls until cleared.
pub struct CpuSurface {
    width: u32,
    height: u32,
    pixmap: vello_cpu::Pixmap,
    path: BezPath,
    fill_color: Rgba8,
    stroke_color: Rgba8,
    line_width: f64,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> FloraResult<Self> {
        let (w, h) = dims_u16(width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(w, h),
            path: BezPath::new(),
            fill_color: Rgba8::opaque(0, 0, 0),
            stroke_color: Rgba8::opaque(0, 0, 0),
            line_width: 1.0,
        })
    }

    /// Premultiplied RGBA8 pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn paint_path(&mut self, path: &BezPath, color: Rgba8) {
        let Ok((w, h)) = dims_u16(self.width, self.height) else {
            return;
        };
        if w == 0 || h == 0 {
            return;
        }
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }
}

impl Surface2d for CpuSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = clamp_dims(width, height);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        let (w, h) = dims_u16(width, height).unwrap_or((0, 0));
        self.pixmap = vello_cpu::Pixmap::new(w, h);
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.path.curve_to(c1, c2, end);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        if sweep.abs() >= std::f64::consts::TAU {
            for el in Circle::new(center, radius).path_elements(PATH_TOLERANCE) {
                self.path.push(el);
            }
        } else {
            let arc = Arc::new(center, (radius, radius), start_angle, sweep, 0.0);
            for el in arc.path_elements(PATH_TOLERANCE) {
                self.path.push(el);
            }
        }
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Rgba8) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width.max(0.0);
    }

    fn fill(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let path = self.path.clone();
        let color = self.fill_color;
        self.paint_path(&path, color);
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() || self.line_width <= 0.0 {
            return;
        }
        // Canvas stroking defaults: butt caps, miter joins.
        let style = Stroke::new(self.line_width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter);
        let outline = kurbo::stroke(
            self.path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        let color = self.stroke_color;
        self.paint_path(&outline, color);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let x0 = rect.min_x().max(0.0) as usize;
        let y0 = rect.min_y().max(0.0) as usize;
        let x1 = (rect.max_x().min(f64::from(self.width))).max(0.0) as usize;
        let y1 = (rect.max_y().min(f64::from(self.height))).max(0.0) as usize;
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let row_stride = self.width as usize * 4;
        let data = self.pixmap.data_as_u8_slice_mut();
        for y in y0..y1 {
            let row = y * row_stride;
            data[row + x0 * 4..row + x1 * 4].fill(0);
        }
    }
}

/// Headless [`SurfaceProvider`] creating an offscreen [`CpuSurface`].
///
/// Container and style options describe host-page presentation and have no
/// meaning offscreen; they are accepted and ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSurfaceProvider;

impl SurfaceProvider for CpuSurfaceProvider {
    fn acquire(
        &mut self,
        _options: &Options,
        viewport: Viewport,
    ) -> FloraResult<Box<dyn Surface2d>> {
        let width = viewport.width.max(0.0) as u32;
        let height = viewport.height.max(0.0) as u32;
        let (width, height) = clamp_dims(width, height);
        Ok(Box::new(CpuSurface::new(width, height)?))
    }
}

fn dims_u16(width: u32, height: u32) -> FloraResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FloraError::surface("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FloraError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

fn clamp_dims(width: u32, height: u32) -> (u32, u32) {
    let max = u32::from(u16::MAX);
    if width > max || height > max {
        tracing::warn!(width, height, "surface dimensions exceed u16, clamping");
    }
    (width.min(max), height.min(max))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_square(surface: &mut CpuSurface) {
        surface.begin_path();
        surface.move_to(Point::new(4.0, 4.0));
        surface.line_to(Point::new(12.0, 4.0));
        surface.line_to(Point::new(12.0, 12.0));
        surface.line_to(Point::new(4.0, 12.0));
        surface.close_path();
        surface.set_fill_color(Rgba8::opaque(255, 0, 0));
        surface.fill();
    }

    #[test]
    fn fill_writes_pixels() {
        let mut surface = CpuSurface::new(16, 16).unwrap();
        assert!(surface.data().iter().all(|&b| b == 0));
        filled_square(&mut surface);
        assert!(surface.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn stroke_writes_pixels() {
        let mut surface = CpuSurface::new(16, 16).unwrap();
        surface.begin_path();
        surface.move_to(Point::new(2.0, 8.0));
        surface.line_to(Point::new(14.0, 8.0));
        surface.set_stroke_color(Rgba8::opaque(0, 128, 0));
        surface.set_line_width(2.0);
        surface.stroke();
        assert!(surface.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn clear_rect_zeroes_the_region() {
        let mut surface = CpuSurface::new(16, 16).unwrap();
        filled_square(&mut surface);
        surface.clear_rect(Rect::new(0.0, 0.0, 16.0, 16.0));
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn path_persists_across_fill_for_outline_stroke() {
        let mut surface = CpuSurface::new(16, 16).unwrap();
        surface.begin_path();
        surface.arc(Point::new(8.0, 8.0), 4.0, 0.0, std::f64::consts::TAU);
        surface.set_fill_color(Rgba8::opaque(255, 232, 232));
        surface.fill();
        // The same path can still be stroked to outline the dot.
        surface.set_stroke_color(Rgba8::opaque(228, 220, 220));
        surface.set_line_width(0.5);
        surface.stroke();
        assert!(surface.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut surface = CpuSurface::new(16, 16).unwrap();
        filled_square(&mut surface);
        surface.resize(32, 8);
        assert_eq!(surface.width(), 32);
        assert_eq!(surface.height(), 8);
        assert_eq!(surface.data().len(), 32 * 8 * 4);
        assert!(surface.data().iter().all(|&b| b == 0));
    }
}
