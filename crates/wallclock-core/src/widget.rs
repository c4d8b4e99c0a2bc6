use std::{fmt, sync::Arc, time::Duration};

use log::{debug, trace, warn};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use wallclock_proto::ports::{
    surface::DisplaySurface,
    time_source::{SystemTimeSource, TimeSource},
};

use crate::{
    format::{Field, format_date, format_time, labeled_value, render_text},
    surface::SurfaceRegistry,
};

/// Shared between the widget and its refresh task.
struct Renderer {
    surface: Option<Arc<dyn DisplaySurface>>,
    source:  Arc<dyn TimeSource>,
}

impl Renderer {
    fn render(&self) {
        let now = self.source.now();
        let time = format_time(&now);
        let date = format_date(&now);

        let Some(surface) = &self.surface else {
            trace!("No display surface attached, skipping render of {date} {time}");
            return;
        };

        if let Err(err) = surface.replace_text(&render_text(&date, &time)) {
            warn!("Failed to render clock: {err}");
        }
    }

    fn read_field(&self, field: Field) -> String {
        let Some(surface) = &self.surface else {
            return String::new();
        };

        match surface.text() {
            Ok(text) => labeled_value(&text, field)
                .map(str::to_owned)
                .unwrap_or_default(),
            Err(err) => {
                warn!("Failed to read clock surface: {err}");
                String::new()
            }
        }
    }
}

/// Self-refreshing date and time display.
///
/// Construction renders once. [`start`](ClockWidget::start) keeps the surface
/// fresh on a fixed period until [`stop`](ClockWidget::stop) is called or the
/// widget is dropped.
pub struct ClockWidget {
    renderer: Arc<Renderer>,
    task:     Option<JoinHandle<()>>,
}

impl ClockWidget {
    /// Create a widget bound to `surface` and render it immediately.
    ///
    /// A missing surface is tolerated: renders become no-ops and the
    /// read-back accessors return empty strings.
    pub fn new<S>(surface: Option<Arc<dyn DisplaySurface>>, source: S) -> Self
    where
        S: TimeSource + 'static,
    {
        let widget = Self {
            renderer: Arc::new(Renderer {
                surface,
                source: Arc::new(source),
            }),
            task:     None,
        };
        widget.render();
        widget
    }

    /// Create a widget reading the host's local clock.
    pub fn with_system_time(surface: Option<Arc<dyn DisplaySurface>>) -> Self {
        Self::new(surface, SystemTimeSource)
    }

    /// Look the surface up by identifier, then behave like [`ClockWidget::new`].
    pub fn mount<S>(registry: &SurfaceRegistry, id: &str, source: S) -> Self
    where
        S: TimeSource + 'static,
    {
        let surface = registry.lookup(id);
        if surface.is_none() {
            warn!("Display surface '{id}' not found, clock will not be shown");
        }
        Self::new(surface, source)
    }

    pub fn has_surface(&self) -> bool {
        self.renderer.surface.is_some()
    }

    /// Sample the time source once and write date and time to the surface.
    pub fn render(&self) {
        self.renderer.render();
    }

    /// Re-render every `period` on the given runtime.
    ///
    /// The first scheduled render happens one period after the call. Starting
    /// an already running widget replaces its task.
    pub fn start(&mut self, handle: &Handle, period: Duration) {
        self.stop();

        if period.is_zero() {
            warn!("Refusing to start clock with a zero refresh period");
            return;
        }

        debug!("Starting clock refresh every {period:?}");

        let renderer = Arc::clone(&self.renderer);
        self.task = Some(handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                renderer.render();
            }
        }));
    }

    /// Cancel the refresh task. Does nothing when not running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Stopping clock refresh");
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Date currently shown on the surface, or an empty string.
    pub fn displayed_date(&self) -> String {
        self.renderer.read_field(Field::Date)
    }

    /// Time currently shown on the surface, or an empty string.
    pub fn displayed_time(&self) -> String {
        self.renderer.read_field(Field::Time)
    }
}

impl fmt::Debug for ClockWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockWidget")
            .field("surface", &self.renderer.surface)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Drop for ClockWidget {
    fn drop(&mut self) {
        self.stop();
    }
}
