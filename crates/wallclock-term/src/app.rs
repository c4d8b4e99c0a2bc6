use std::{future::Future, sync::Arc};

use log::info;
use tokio::runtime::Handle;
use wallclock_core::{
    ClockWidget, DisplaySurface, SystemTimeSource, TimeSource, config::Config,
    surface::SurfaceRegistry,
};

/// Hosts a single clock widget on a registered display surface.
#[derive(Debug)]
pub struct App {
    config: Config,
    clock:  ClockWidget,
}

impl App {
    /// Register `surface` under the configured target and mount the clock on
    /// it using the host's local time.
    pub fn new(config: Config, surface: Arc<dyn DisplaySurface>) -> Self {
        Self::with_time_source(config, surface, SystemTimeSource)
    }

    pub fn with_time_source<S>(config: Config, surface: Arc<dyn DisplaySurface>, source: S) -> Self
    where
        S: TimeSource + 'static,
    {
        let mut registry = SurfaceRegistry::new();
        registry.register(config.clock.target.clone(), surface);

        let clock = ClockWidget::mount(&registry, &config.clock.target, source);

        Self { config, clock }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &ClockWidget {
        &self.clock
    }

    pub fn start(&mut self, handle: &Handle) {
        info!(
            "Clock mounted on '{}', refreshing every {} ms",
            self.config.clock.target, self.config.clock.interval_ms
        );
        self.clock.start(handle, self.config.clock.interval());
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Keep the clock running until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.start(&Handle::current());
        shutdown.await;
        info!("Shutting down clock");
        self.stop();
    }
}
