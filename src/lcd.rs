//! HD44780 driver on top of a [`SendCommand`] sender

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, DataWidth, Font, LineMode, MoveDirection, ShiftType, State},
    sender::SendCommand,
    Result,
};

/// DDRAM address of the first cell of the second line
const SECOND_LINE_ADDR: u8 = 0x40;

/// A display line on a 2-line LCD
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    #[allow(missing_docs)]
    First,
    #[allow(missing_docs)]
    Second,
}

impl Line {
    fn ddram_addr(self) -> u8 {
        match self {
            Line::First => 0x00,
            Line::Second => SECOND_LINE_ADDR,
        }
    }
}

/// The init sequence, in the order it is sent
///
/// 8-bit bus, 2 lines, 5×8 font, display and cursor on without blink,
/// clear, left-to-right entry, cursor to the first cell.
pub const INIT_SEQUENCE: [CommandSet; 5] = [
    CommandSet::FunctionSet(DataWidth::Bit8, LineMode::TwoLine, Font::Font5x8),
    CommandSet::DisplayOnOff {
        display: State::On,
        cursor: State::On,
        cursor_blink: State::Off,
    },
    CommandSet::ClearDisplay,
    CommandSet::EntryModeSet(MoveDirection::LeftToRight, ShiftType::CursorOnly),
    CommandSet::SetDDRAM(0x00),
];

/// LCD driver
///
/// Every write is fire-and-forget: the RW line is not wired, so the busy flag
/// can't be read, and each latch is given `settle_us` instead.
pub struct Lcd<Sender: SendCommand> {
    sender: Sender,
    settle_us: u32,
}

impl<Sender: SendCommand> Lcd<Sender> {
    /// Wrap a sender; nothing is sent until [`Lcd::init`]
    pub fn new(sender: Sender, settle_us: u32) -> Self {
        Self { sender, settle_us }
    }

    /// Time EN is held high for each latch, in µs
    pub fn get_settle_us(&self) -> u32 {
        self.settle_us
    }

    #[allow(missing_docs)]
    pub fn set_settle_us(&mut self, settle_us: u32) {
        self.settle_us = settle_us;
    }

    /// Give the sender back
    pub fn free(self) -> Sender {
        self.sender
    }

    /// Send [`INIT_SEQUENCE`]
    pub fn init(&mut self, delayer: &mut impl DelayNs) -> Result<()> {
        INIT_SEQUENCE
            .iter()
            .try_for_each(|&command| self.send_command(command, delayer))
    }

    /// Latch one instruction
    pub fn send_command(&mut self, command: CommandSet, delayer: &mut impl DelayNs) -> Result<()> {
        self.sender.send(command, delayer, self.settle_us)
    }

    /// Latch one displayable byte at the cursor
    pub fn send_data(&mut self, byte: u8, delayer: &mut impl DelayNs) -> Result<()> {
        self.sender
            .send(CommandSet::WriteDataToRAM(byte), delayer, self.settle_us)
    }

    /// Write every byte of `text` from the cursor on, in order
    ///
    /// There is no wrapping: text longer than the visible line runs into
    /// DDRAM cells that are off screen.
    pub fn render_text(&mut self, text: &str, delayer: &mut impl DelayNs) -> Result<()> {
        text.bytes()
            .try_for_each(|byte| self.send_data(byte, delayer))
    }

    /// Blank the display and home the cursor
    pub fn clear(&mut self, delayer: &mut impl DelayNs) -> Result<()> {
        self.send_command(CommandSet::ClearDisplay, delayer)
    }

    /// Move the cursor to the start of `line`
    pub fn set_line(&mut self, line: Line, delayer: &mut impl DelayNs) -> Result<()> {
        self.send_command(CommandSet::SetDDRAM(line.ddram_addr()), delayer)
    }
}
