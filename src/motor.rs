//! Two-line H-bridge direction control for a DC motor
//!
//! | IN1 | IN2 | Motion |
//! | --- | --- | ------ |
//! | 1   | 0   | forward |
//! | 0   | 1   | backward |
//! | 0   | 0   | stop (coast) |
//!
//! The bridge's enable line is taken so nothing else can drive it, but speed
//! control is not implemented and the line is never written.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::{error::line, Result};

/// Direction last applied to the bridge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    #[allow(missing_docs)]
    Forward,
    #[allow(missing_docs)]
    Backward,
    #[allow(missing_docs)]
    Stopped,
}

/// DC motor behind an H-bridge
pub struct Motor<P: OutputPin, En> {
    in1: P,
    in2: P,
    enable: En,
    direction: Option<Direction>,
}

impl<P: OutputPin, En> Motor<P, En> {
    /// Take the direction lines and the enable line without driving any of them
    pub fn new(in1: P, in2: P, enable: En) -> Self {
        Self {
            in1,
            in2,
            enable,
            direction: None,
        }
    }

    /// IN1 high, IN2 low
    pub fn forward(&mut self) -> Result<()> {
        self.apply(true, false, Direction::Forward)
    }

    /// IN1 low, IN2 high
    pub fn backward(&mut self) -> Result<()> {
        self.apply(false, true, Direction::Backward)
    }

    /// Both lines low
    pub fn stop(&mut self) -> Result<()> {
        self.apply(false, false, Direction::Stopped)
    }

    /// Last direction applied, `None` if the motor was never commanded
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Give the lines back, as `(in1, in2, enable)`
    pub fn free(self) -> (P, P, En) {
        (self.in1, self.in2, self.enable)
    }

    fn apply(&mut self, in1: bool, in2: bool, direction: Direction) -> Result<()> {
        match in1 {
            true => self.in1.set_high().map_err(line)?,
            false => self.in1.set_low().map_err(line)?,
        }
        match in2 {
            true => self.in2.set_high().map_err(line)?,
            false => self.in2.set_low().map_err(line)?,
        }

        info!("motor {:?}", direction);
        self.direction = Some(direction);
        Ok(())
    }
}
