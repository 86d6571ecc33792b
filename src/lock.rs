//! The lock's one-shot control flow
//!
//! ```text
//! Idle -> AwaitingActivation -+-> PasswordEntry -> Evaluated(Granted) -> MotorDecision -+-> Halted
//!                             |                 \-> Evaluated(Denied) ------------------+
//!                             \---------------------------------------------------------/
//! ```
//!
//! The activation button is sampled exactly once. If it isn't held at that
//! instant the lock halts without touching the LCD or the motor. After a
//! successful entry the selector button picks stop (held) or backward (not
//! held). Forward is never selected.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};
use log::{debug, info};

use crate::{
    button::Button,
    config::Config,
    credential::{Entry, PIN_LEN},
    keypad::Keypad,
    lcd::{Lcd, Line},
    motor::{Direction, Motor},
    sender::SendCommand,
    Result,
};

/// Shown above the masked entry
pub const PROMPT: &str = "Enter Password:";
/// Shown when the entry matches
pub const GRANTED: &str = "Access Granted";
/// Shown when the entry doesn't match
pub const DENIED: &str = "Wrong Password";
/// Shown after [`GRANTED`], before the motor is set
pub const WELCOME: &str = "Welcome User";
/// Shown after [`DENIED`], before halting
pub const RETRY: &str = "Try Again";
/// Echoed for every digit entered
pub const MASK: u8 = b'*';

/// Result of comparing the entry with the stored credential
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    #[allow(missing_docs)]
    Granted,
    #[allow(missing_docs)]
    Denied,
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        match matched {
            true => Verdict::Granted,
            false => Verdict::Denied,
        }
    }
}

/// Where the control flow is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has run yet
    Idle,
    /// About to sample the activation button
    AwaitingActivation,
    /// Collecting and checking the PIN
    PasswordEntry,
    /// PIN checked
    Evaluated(Verdict),
    /// About to sample the selector button
    MotorDecision,
    /// Terminal
    Halted,
}

/// What one run ended with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// `None` if the activation button wasn't held
    pub verdict: Option<Verdict>,
    /// `None` unless access was granted
    pub motor: Option<Direction>,
}

/// Every driver the lock needs, each owning its own lines
pub struct Parts<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn>
where
    Sender: SendCommand,
    RowPin: OutputPin,
    ColPin: InputPin,
    BtnPin: InputPin,
    MotorPin: OutputPin,
{
    #[allow(missing_docs)]
    pub lcd: Lcd<Sender>,
    #[allow(missing_docs)]
    pub keypad: Keypad<RowPin, ColPin>,
    /// Starts the flow when held at power-up
    pub activation: Button<BtnPin>,
    /// Held: stop the motor; released: run it backward
    pub selector: Button<BtnPin>,
    #[allow(missing_docs)]
    pub motor: Motor<MotorPin, MotorEn>,
}

/// The lock: drivers, the shared delayer, config, and the session state
pub struct Lock<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn, Delayer>
where
    Sender: SendCommand,
    RowPin: OutputPin,
    ColPin: InputPin,
    BtnPin: InputPin,
    MotorPin: OutputPin,
    Delayer: DelayNs,
{
    parts: Parts<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn>,
    delayer: Delayer,
    config: Config,
    phase: Phase,
    entry: Entry,
    verdict: Option<Verdict>,
}

impl<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn, Delayer>
    Lock<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn, Delayer>
where
    Sender: SendCommand,
    RowPin: OutputPin,
    ColPin: InputPin,
    BtnPin: InputPin,
    MotorPin: OutputPin,
    Delayer: DelayNs,
{
    /// Assemble a lock in [`Phase::Idle`]; no line is touched
    ///
    /// The LCD's settle time is replaced by the delay unit of `config`, so
    /// latching, debouncing and the verdict pause all share one value.
    pub fn new(
        mut parts: Parts<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn>,
        delayer: Delayer,
        config: Config,
    ) -> Self {
        parts.lcd.set_settle_us(config.get_delay_us());

        Self {
            parts,
            delayer,
            config,
            phase: Phase::Idle,
            entry: Entry::new(),
            verdict: None,
        }
    }

    #[allow(missing_docs)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Digits entered in this session
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Summary so far; final once [`Phase::Halted`] is reached
    pub fn outcome(&self) -> Outcome {
        Outcome {
            verdict: self.verdict,
            motor: self.parts.motor.direction(),
        }
    }

    /// Take the lock apart
    pub fn free(self) -> (Parts<Sender, RowPin, ColPin, BtnPin, MotorPin, MotorEn>, Delayer) {
        (self.parts, self.delayer)
    }

    /// Step until [`Phase::Halted`]
    ///
    /// May block forever inside password entry, see [`Lock::enter_password`].
    /// This returns instead of halting so the caller decides what halting
    /// means; on hardware that is [`halt`].
    pub fn run(&mut self) -> Result<Outcome> {
        while self.phase != Phase::Halted {
            self.step()?;
        }
        Ok(self.outcome())
    }

    /// Perform one transition and return the new phase
    ///
    /// [`Phase::Halted`] is terminal: stepping it does nothing.
    pub fn step(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::Idle => Phase::AwaitingActivation,

            Phase::AwaitingActivation => match self.parts.activation.is_pressed()? {
                true => Phase::PasswordEntry,
                false => {
                    info!("activation button not held, halting");
                    Phase::Halted
                }
            },

            Phase::PasswordEntry => {
                let verdict = Verdict::from(self.password_system()?);
                self.verdict = Some(verdict);
                Phase::Evaluated(verdict)
            }

            Phase::Evaluated(Verdict::Granted) => {
                self.show(WELCOME)?;
                Phase::MotorDecision
            }

            Phase::Evaluated(Verdict::Denied) => {
                self.show(RETRY)?;
                Phase::Halted
            }

            Phase::MotorDecision => {
                match self.parts.selector.is_pressed()? {
                    true => self.parts.motor.stop()?,
                    false => self.parts.motor.backward()?,
                }
                Phase::Halted
            }

            Phase::Halted => Phase::Halted,
        };

        if next != self.phase {
            debug!("{:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
        Ok(next)
    }

    /// Init the LCD, collect a PIN and check it
    pub fn password_system(&mut self) -> Result<bool> {
        self.parts.lcd.init(&mut self.delayer)?;
        self.enter_password()?;
        self.check_password()
    }

    /// Prompt, then scan the keypad until [`PIN_LEN`] digits are in
    ///
    /// Each digit is stored as ASCII and echoed as [`MASK`], then one delay
    /// unit passes before the next scan. Scans that find no key are retried
    /// at once. There is no timeout and no way out short of entering every
    /// digit.
    pub fn enter_password(&mut self) -> Result<()> {
        let delay_us = self.config.get_delay_us();

        self.entry.clear();
        self.parts.lcd.clear(&mut self.delayer)?;
        self.parts.lcd.render_text(PROMPT, &mut self.delayer)?;
        self.parts.lcd.set_line(Line::Second, &mut self.delayer)?;

        while !self.entry.is_complete() {
            let key = self.parts.keypad.scan_once(&mut self.delayer, delay_us)?;
            let Some(ascii) = key.to_ascii() else {
                continue;
            };

            self.entry.push(ascii);
            debug!("digit {} of {} entered", self.entry.len(), PIN_LEN);
            self.parts.lcd.send_data(MASK, &mut self.delayer)?;
            self.delayer.delay_us(delay_us);
        }

        Ok(())
    }

    /// Compare the entry with the stored credential and show the verdict
    pub fn check_password(&mut self) -> Result<bool> {
        let matched = self.config.get_credential().matches(&self.entry);

        self.show(match matched {
            true => GRANTED,
            false => DENIED,
        })?;
        self.delayer.delay_us(self.config.get_delay_us());

        info!("access {}", if matched { "granted" } else { "denied" });
        Ok(matched)
    }

    /// Clear the LCD and write `text` on the first line
    fn show(&mut self, text: &str) -> Result<()> {
        self.parts.lcd.clear(&mut self.delayer)?;
        self.parts.lcd.render_text(text, &mut self.delayer)
    }
}

/// Stop here for good; only a reset gets out
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
