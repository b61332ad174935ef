//! The machine's motion command vocabulary and its text encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places for coordinate output.
const COORD_PRECISION: usize = 3;

/// One motion command for the pin-bed controller.
///
/// The controller accepts a minimal G-code subset, one command per line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    /// `G28 X Y` — home the planar axes.
    HomeXy,
    /// `G0 X<x> Y<y>` — rapid move to a planar position.
    RapidXy {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `G0 Z<z>` — rapid move of the vertical axis.
    RapidZ {
        /// Target height.
        z: f64,
    },
}

/// Format a coordinate as a fixed-precision numeric literal.
fn format_coord(value: f64) -> String {
    format!("{:.prec$}", value, prec = COORD_PRECISION)
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCommand::HomeXy => write!(f, "G28 X Y"),
            MotionCommand::RapidXy { x, y } => {
                write!(f, "G0 X{} Y{}", format_coord(*x), format_coord(*y))
            }
            MotionCommand::RapidZ { z } => write!(f, "G0 Z{}", format_coord(*z)),
        }
    }
}
