/*!
# Keylock

A keypad PIN lock: a 4×3 matrix keypad for input, an HD44780-class LCD for
status, and an H-bridge DC motor as the actuator.

Basic Usage:

1. Hand every line to its driver <br/>
    * LCD: [`sender::ParallelSender`] (RS, EN, 8 data lines), wrapped in [`lcd::Lcd`]
    * Keypad: [`keypad::Keypad`] (4 row outputs, 3 column inputs)
    * Buttons: [`button::Button`] (activation, motor selector)
    * Motor: [`motor::Motor`] (IN1, IN2, EN)
<br/>
<br/>
2. Build a [`lock::Lock`] from [`lock::Parts`], a delayer and a [`config::Config`]
<br/>
<br/>
3. Call [`lock::Lock::run()`], then [`lock::halt()`]

All lines are `embedded-hal` 1.0 pins and all timing goes through
[`DelayNs`](embedded_hal::delay::DelayNs), so the whole flow runs on the host
against simulated lines.
*/

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod button;
pub mod command;
pub mod config;
pub mod credential;
pub mod delay;
pub mod error;
pub mod keypad;
pub mod lcd;
pub mod lock;
pub mod motor;
pub mod sender;
pub mod utils;

#[cfg(test)]
mod sim;

pub use error::{Error, Result};
