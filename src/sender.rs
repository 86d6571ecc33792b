//! Built-in sender
//! If you want to drive the LCD some other way, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::{command::Command, Result};

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to latch bytes into the LCD
pub trait SendCommand {
    /// Put a [`Command`] on the bus and latch it
    ///
    /// The enable strobe is held high for `settle_us`, and is always low again
    /// once this returns `Ok`. There is no acknowledge from the LCD, so a
    /// successful return only means the lines were driven.
    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
        settle_us: u32,
    ) -> Result<()>;
}
