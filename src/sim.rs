//! Simulated board for host tests
//!
//! Every [`SimPin`] shares one [`Board`]. Output writes are logged in order, and
//! the keypad columns answer according to which rows are currently driven low.
//! [`SimDelay`] waits are logged in the same timeline as the pin accesses, and
//! [`record_logs`] captures `log` output on the calling thread.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    convert::Infallible,
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorKind, ErrorType, InputPin, OutputPin},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Line {
    Rs,
    En,
    Db(u8),
    Row(u8),
    Col(u8),
    Activation,
    Selector,
    In1,
    In2,
    MotorEn,
}

/// One pin access or wait, in the order the firmware did it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Write(Line, bool),
    Read(Line, bool),
    /// Microseconds
    Delay(u32),
}

/// A scripted key press
///
/// The key stays invisible for `idle_scans` full scans, then reads low for
/// `hold_reads` column samples, then reads high once and is gone.
#[derive(Clone, Copy, Debug)]
struct Press {
    row: u8,
    col: u8,
    idle_scans: usize,
    hold_reads: usize,
}

#[derive(Default)]
struct Board {
    levels: HashMap<Line, bool>,
    writes: Vec<(Line, bool)>,
    timeline: Vec<Event>,
    presses: VecDeque<Press>,
    col_reads: usize,
}

impl Board {
    fn write(&mut self, line: Line, high: bool) {
        // a new scan always starts by driving the first row low
        if line == Line::Row(0) && !high {
            if let Some(press) = self.presses.front_mut() {
                press.idle_scans = press.idle_scans.saturating_sub(1);
            }
        }
        self.levels.insert(line, high);
        self.writes.push((line, high));
        self.timeline.push(Event::Write(line, high));
    }

    fn read(&mut self, line: Line) -> bool {
        let high = match line {
            Line::Col(col) => self.read_col(col),
            // inputs are pulled up
            other => self.levels.get(&other).copied().unwrap_or(true),
        };
        self.timeline.push(Event::Read(line, high));
        high
    }

    fn read_col(&mut self, col: u8) -> bool {
        self.col_reads += 1;

        let driven: Vec<u8> = (0..4)
            .filter(|&row| self.levels.get(&Line::Row(row)) == Some(&false))
            .collect();

        let Some(press) = self.presses.front_mut() else {
            return true;
        };

        if press.idle_scans > 0 || press.col != col || driven != [press.row] {
            return true;
        }

        if press.hold_reads > 0 {
            press.hold_reads -= 1;
            false
        } else {
            self.presses.pop_front();
            true
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct Sim(Rc<RefCell<Board>>);

impl Sim {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pin(&self, line: Line) -> SimPin {
        SimPin {
            sim: self.clone(),
            line,
        }
    }

    /// Drive an input line from outside, without logging it as a firmware write
    pub(crate) fn set_input(&self, line: Line, high: bool) {
        self.0.borrow_mut().levels.insert(line, high);
    }

    pub(crate) fn level(&self, line: Line) -> Option<bool> {
        self.0.borrow().levels.get(&line).copied()
    }

    pub(crate) fn delay(&self) -> SimDelay {
        SimDelay { sim: self.clone() }
    }

    pub(crate) fn timeline(&self) -> Vec<Event> {
        self.0.borrow().timeline.clone()
    }

    /// Microseconds of every wait, in order
    pub(crate) fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .timeline
            .iter()
            .filter_map(|event| match event {
                Event::Delay(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn writes(&self) -> Vec<(Line, bool)> {
        self.0.borrow().writes.clone()
    }

    pub(crate) fn writes_to(&self, line: Line) -> Vec<bool> {
        self.0
            .borrow()
            .writes
            .iter()
            .filter(|(l, _)| *l == line)
            .map(|(_, high)| *high)
            .collect()
    }

    pub(crate) fn col_reads(&self) -> usize {
        self.0.borrow().col_reads
    }

    /// Queue a key press at zero-based `row`/`col`
    pub(crate) fn press(&self, row: u8, col: u8, idle_scans: usize, hold_reads: usize) {
        self.0.borrow_mut().presses.push_back(Press {
            row,
            col,
            idle_scans,
            hold_reads,
        });
    }

    /// Queue a key press by digit, using the 4×3 layout
    pub(crate) fn press_digit(&self, digit: u8, idle_scans: usize) {
        let (row, col) = match digit {
            7 => (0, 0),
            8 => (0, 1),
            9 => (0, 2),
            4 => (1, 0),
            5 => (1, 1),
            6 => (1, 2),
            1 => (2, 0),
            2 => (2, 1),
            3 => (2, 2),
            0 => (3, 1),
            _ => panic!("no key for digit {digit}"),
        };
        self.press(row, col, idle_scans, 2);
    }

    pub(crate) fn pending_presses(&self) -> usize {
        self.0.borrow().presses.len()
    }

    /// Every byte the LCD latched, as `(rs_high, byte)`, in order
    ///
    /// A byte is latched on each falling edge of EN, with whatever RS and the
    /// data bus hold at that moment.
    pub(crate) fn latched(&self) -> Vec<(bool, u8)> {
        let mut levels: HashMap<Line, bool> = HashMap::new();
        let mut latched = Vec::new();

        for &(line, high) in self.0.borrow().writes.iter() {
            let was_high = levels.get(&line).copied().unwrap_or(false);
            levels.insert(line, high);

            if line == Line::En && was_high && !high {
                let byte = (0..8).fold(0u8, |acc, bit| {
                    match levels.get(&Line::Db(bit)).copied().unwrap_or(false) {
                        true => acc | (1 << bit),
                        false => acc,
                    }
                });
                let rs = levels.get(&Line::Rs).copied().unwrap_or(false);
                latched.push((rs, byte));
            }
        }

        latched
    }

    /// Instruction bytes latched with RS low
    pub(crate) fn commands(&self) -> Vec<u8> {
        self.latched()
            .into_iter()
            .filter(|(rs, _)| !rs)
            .map(|(_, byte)| byte)
            .collect()
    }

    /// Data bytes latched with RS high, as text
    pub(crate) fn text(&self) -> String {
        self.latched()
            .into_iter()
            .filter(|(rs, _)| *rs)
            .map(|(_, byte)| byte as char)
            .collect()
    }

    /// Data bytes latched since the last clear-display instruction
    pub(crate) fn screen(&self) -> String {
        let latched = self.latched();
        let start = latched
            .iter()
            .rposition(|&(rs, byte)| !rs && byte == 0x01)
            .map_or(0, |pos| pos + 1);
        latched[start..]
            .iter()
            .filter(|(rs, _)| *rs)
            .map(|(_, byte)| *byte as char)
            .collect()
    }
}

/// Delayer that returns at once and logs the wait in the board's timeline
pub(crate) struct SimDelay {
    sim: Sim,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.sim.0.borrow_mut().timeline.push(Event::Delay(us));
    }
}

pub(crate) struct SimPin {
    sim: Sim,
    line: Line,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.sim.0.borrow_mut().write(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.sim.0.borrow_mut().write(self.line, true);
        Ok(())
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.sim.0.borrow_mut().read(self.line))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// A pin whose every access fails
pub(crate) struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

thread_local! {
    static LOG_LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every record in a per-thread buffer, so parallel tests don't mix
struct Recorder;

impl log::Log for Recorder {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LOG_LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder;

/// Start capturing log lines on this thread, at every level
pub(crate) fn record_logs() {
    // only the first test to get here installs it
    let _ = log::set_logger(&RECORDER);
    log::set_max_level(log::LevelFilter::Trace);
    LOG_LINES.with(|lines| lines.borrow_mut().clear());
}

/// Lines captured on this thread since [`record_logs`]
pub(crate) fn recorded_logs() -> Vec<String> {
    LOG_LINES.with(|lines| lines.borrow().clone())
}
