//! Per-pin motion planning and program output.

use std::io::Write;

use pinbed_depthmap::{PinHeight, PinRecord};

use crate::command::MotionCommand;
use crate::error::{GcodeError, Result};

/// Plan the motion command stream for an ordered pin layout.
///
/// A homing command comes first. Then, per pin in sequence order:
///
/// - [`PinHeight::Measured`]: move over the pin, plunge to its height,
///   retract to the zero plane;
/// - [`PinHeight::Undetermined`]: same motion, but plunge to the fallback
///   height — the mean of all measured heights in the layout;
/// - [`PinHeight::AtBase`]: no commands, the pin is already home.
///
/// Fails with [`GcodeError::NoMeasuredHeights`] if a fallback is needed
/// but no pin has a measured height, rather than emitting a NaN target.
pub fn plan_motion(pins: &[PinRecord]) -> Result<Vec<MotionCommand>> {
    let fallback = fallback_height(pins);

    let mut commands = vec![MotionCommand::HomeXy];
    for pin in pins {
        let z = match pin.height {
            PinHeight::Measured(z) => z,
            PinHeight::Undetermined => fallback.ok_or(GcodeError::NoMeasuredHeights)?,
            PinHeight::AtBase => continue,
        };
        commands.push(MotionCommand::RapidXy { x: pin.x, y: pin.y });
        commands.push(MotionCommand::RapidZ { z });
        commands.push(MotionCommand::RapidZ { z: 0.0 });
    }
    Ok(commands)
}

/// Mean of the measured heights, or `None` if there are none.
///
/// Undetermined pins are excluded: with heights as a tagged type the
/// no-sample sentinel cannot leak into the average, and at-base pins
/// contribute nothing, matching the controller's "nonzero heights only"
/// convention.
fn fallback_height(pins: &[PinRecord]) -> Option<f64> {
    let measured: Vec<f64> = pins.iter().filter_map(|p| p.height.measured()).collect();
    if measured.is_empty() {
        None
    } else {
        Some(measured.iter().sum::<f64>() / measured.len() as f64)
    }
}

/// Write a command stream to the output sink, one command per line.
///
/// A sink failure aborts emission; no cleanup beyond releasing the sink.
pub fn write_program<W: Write>(mut sink: W, commands: &[MotionCommand]) -> Result<()> {
    for command in commands {
        writeln!(sink, "{}", command)?;
    }
    sink.flush()?;
    Ok(())
}
