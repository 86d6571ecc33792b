use embedded_hal::{delay::DelayNs, digital::OutputPin};
use log::trace;

use crate::{
    command::{Command, RegisterSelection},
    error::line,
    utils::{BitOps, BitState},
    Result,
};

use super::SendCommand;

/// 8-bit parallel bus with RS and EN; RW is tied to ground
pub struct ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 8],
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// Collect the control lines and the data bus, DB0 first
    ///
    /// No line is touched until the first [`SendCommand::send`].
    #[allow(clippy::too_many_arguments)]
    pub fn new_8pin(
        rs: ControlPin,
        en: ControlPin,
        db0: DBPin,
        db1: DBPin,
        db2: DBPin,
        db3: DBPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db0, db1, db2, db3, db4, db5, db6, db7],
        }
    }

    /// Give the lines back, as `(rs, en, data bus)`
    pub fn free(self) -> (ControlPin, ControlPin, [DBPin; 8]) {
        (self.rs_pin, self.en_pin, self.db_pins)
    }

    fn push_bits(&mut self, raw_bits: u8) -> Result<()> {
        self.db_pins
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, pin)| match raw_bits.check_bit(index as u8) {
                BitState::Set => pin.set_high().map_err(line),
                BitState::Clear => pin.set_low().map_err(line),
            })
    }
}

impl<ControlPin, DBPin> SendCommand for ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
        settle_us: u32,
    ) -> Result<()> {
        let command = command.into();
        trace!(
            "lcd {:?} {:#04x}",
            command.get_register_selection(),
            command.get_data()
        );

        self.en_pin.set_low().map_err(line)?;

        self.push_bits(command.get_data())?;

        match command.get_register_selection() {
            RegisterSelection::Command => self.rs_pin.set_low().map_err(line)?,
            RegisterSelection::Data => self.rs_pin.set_high().map_err(line)?,
        }

        self.en_pin.set_high().map_err(line)?;
        delayer.delay_us(settle_us);
        self.en_pin.set_low().map_err(line)
    }
}
