//! Core port definitions for wallclock adapters.
//!
//! The clock widget talks to the outside world through two seams: a
//! [`DisplaySurface`](surface::DisplaySurface) it renders into and a
//! [`TimeSource`](time_source::TimeSource) it samples. Hosts provide the
//! implementations; the widget never reaches for global state.

pub mod surface;
pub mod time_source;
