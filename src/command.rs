//! HD44780 instruction set, as the lock uses it
//!
//! The RW line is tied low on this board, so only write instructions exist.

use crate::utils::BitOps;

/// The instructions the lock sends to the LCD
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandSet {
    /// Blank the display and move the cursor home
    ClearDisplay,
    /// Cursor move direction and shift behaviour after each write
    EntryModeSet(MoveDirection, ShiftType),
    #[allow(missing_docs)]
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    /// Bus width, line count and font
    FunctionSet(DataWidth, LineMode, Font),
    /// Move the cursor to a DDRAM address
    SetDDRAM(u8),
    /// Write one byte at the cursor
    WriteDataToRAM(u8),
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum State {
    Off,
    #[default]
    On,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DataWidth {
    Bit4,
    #[default]
    Bit8,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Font {
    #[default]
    Font5x8,
    Font5x11,
}

/// Which LCD register a byte is latched into
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegisterSelection {
    /// Instruction register, RS low
    Command,
    /// Data register, RS high
    Data,
}

/// A raw byte plus the register it goes to, ready for a sender
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: u8) -> Self {
        Self { rs, data }
    }

    /// Register the byte is latched into
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// The byte on the data bus
    pub fn get_data(&self) -> u8 {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match width {
                    DataWidth::Bit4 => raw_bits.clear_bit(4),
                    DataWidth::Bit8 => raw_bits.set_bit(4),
                };

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::SetDDRAM(addr) => {
                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                Self::new(RegisterSelection::Command, 0b1000_0000 + addr)
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}
