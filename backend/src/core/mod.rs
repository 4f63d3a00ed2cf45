//! Kernel: virtual clock, event queue, and calendar helpers

pub mod clock;
pub mod time;
