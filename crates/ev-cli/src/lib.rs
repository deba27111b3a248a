//! CLI library components for the EV market dataset builder.

pub mod logging;
pub mod pipeline;
