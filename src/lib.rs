#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod flower;
pub mod flowers;
pub mod geom;
pub mod runtime;
pub mod surface;
pub mod surface_cpu;

pub use color::{Hsl, Rgba8};
pub use config::{Container, DEFAULT_SURFACE_ID, Options, Viewport, default_styles};
pub use error::{FloraError, FloraResult};
pub use field::{FLOWER_SPACING, Field};
pub use geom::{Point, Vec2};
pub use flower::{ATTRACTION_RADIUS, Flower, FlowerState, STEM_HEIGHT, StemData};
pub use flowers::{Blossom, Daisy, Head, Tulip};
pub use runtime::{FrameHandle, Host, InputEvent, RESIZE_DEBOUNCE, Runtime, TimerHandle};
pub use surface::{Surface2d, SurfaceProvider};
pub use surface_cpu::{CpuSurface, CpuSurfaceProvider};
