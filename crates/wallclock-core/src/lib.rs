pub mod config;
pub mod format;
pub mod surface;
pub mod widget;

pub use wallclock_proto::ports::{
    surface::{DisplaySurface, SurfaceError},
    time_source::{FixedTimeSource, SystemTimeSource, TimeSource},
};
pub use widget::ClockWidget;
