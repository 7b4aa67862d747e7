use std::time::Duration;

use kurbo::Point;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{Options, Viewport},
    error::FloraResult,
    field::Field,
    surface::{Surface2d, SurfaceProvider},
};

/// Quiescent window after the last resize event before the population is
/// rebuilt.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Cancellable handle for a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Cancellable handle for a scheduled timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Services the hosting environment provides to the runtime.
///
/// The host invokes the matching `Runtime::on_*` callback when a scheduled
/// frame or timeout fires and forwards input as [`InputEvent`]s. Everything
/// runs on one logical thread; implementations never call back re-entrantly.
pub trait Host {
    /// Current viewport dimensions; re-read on every resize notification.
    fn viewport(&self) -> Viewport;

    /// Schedule a callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled frame. Safe to call for handles that already
    /// fired.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Schedule a callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a scheduled timeout. Safe to call for handles that already
    /// fired.
    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Unregister every input listener feeding this runtime.
    fn detach_input(&mut self);
}

/// Pointer and viewport notifications, in surface pixel space. Touch input
/// maps onto the same events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Point),
    PointerDown,
    PointerUp,
    Resize,
}

/// The running animation: owns the field, the surface, and the scheduling
/// handles, and turns host callbacks into frames.
pub struct Runtime {
    host: Box<dyn Host>,
    surface: Box<dyn Surface2d>,
    field: Field,
    pointer_down: bool,
    pending_frame: Option<FrameHandle>,
    pending_resize: Option<TimerHandle>,
    stopped: bool,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("pointer_down", &self.pointer_down)
            .field("pending_frame", &self.pending_frame)
            .field("pending_resize", &self.pending_resize)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Construct and start the system: acquire the surface, seed and
    /// populate the field, and request the first frame.
    ///
    /// Fails only on configuration errors from the surface provider (an
    /// unresolvable container is fatal by contract).
    pub fn start(
        options: &Options,
        mut host: Box<dyn Host>,
        provider: &mut dyn SurfaceProvider,
    ) -> FloraResult<Self> {
        let viewport = host.viewport();
        let surface = provider.acquire(options, viewport)?;

        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        let field = Field::new(viewport, rng);

        let pending_frame = Some(host.request_frame());
        Ok(Self {
            host,
            surface,
            field,
            pointer_down: false,
            pending_frame,
            pending_resize: None,
            stopped: false,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn surface(&self) -> &dyn Surface2d {
        self.surface.as_ref()
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// A scheduled frame fired: re-arm the chain, then advance and draw.
    pub fn on_frame(&mut self) {
        if self.stopped {
            return;
        }
        self.pending_frame = Some(self.host.request_frame());
        self.field.frame(self.surface.as_mut());
    }

    /// An input notification arrived. Pointer state updates synchronously;
    /// a resize updates dimensions immediately and (re)arms the debounce
    /// timer that will rebuild the population.
    pub fn on_input(&mut self, event: InputEvent) {
        if self.stopped {
            return;
        }
        match event {
            InputEvent::PointerMove(p) => self.field.set_pointer(p),
            InputEvent::PointerDown => self.pointer_down = true,
            InputEvent::PointerUp => self.pointer_down = false,
            InputEvent::Resize => {
                let viewport = self.host.viewport();
                self.field.set_viewport(viewport);
                self.surface
                    .resize(viewport.width.max(0.0) as u32, viewport.height.max(0.0) as u32);

                if let Some(pending) = self.pending_resize.take() {
                    self.host.clear_timeout(pending);
                }
                self.pending_resize = Some(self.host.set_timeout(RESIZE_DEBOUNCE));
            }
        }
    }

    /// A scheduled timeout fired. Only the pending debounce handle does
    /// anything; stale handles are ignored.
    pub fn on_timeout(&mut self, handle: TimerHandle) {
        if self.stopped {
            return;
        }
        if self.pending_resize == Some(handle) {
            self.pending_resize = None;
            self.field.repopulate();
        }
    }

    /// Stop the animation and release every external registration.
    /// Idempotent; all callbacks are inert afterwards.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        if let Some(timer) = self.pending_resize.take() {
            self.host.clear_timeout(timer);
        }
        self.host.detach_input();
    }
}
