#![warn(missing_docs)]

//! Motion command planning and G-code emission for the pinbed machine.
//!
//! Converts an ordered pin layout into the machine's minimal command
//! subset: home once, then per pin a planar move, a plunge to the target
//! height, and a retract to the zero plane. Pins already at the base need
//! no motion; pins with no sampled height plunge to the mean of the
//! measured heights.

mod command;
mod emit;
mod error;

pub use command::MotionCommand;
pub use emit::{plan_motion, write_program};
pub use error::{GcodeError, Result};
