//! Stored PIN and the digits entered against it

use crate::{Error, Result};

/// PIN length, in digits
pub const PIN_LEN: usize = 4;

/// The PIN the lock opens for
///
/// Always exactly [`PIN_LEN`] ASCII digits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credential([u8; PIN_LEN]);

/// The PIN flashed into the firmware
pub const DEFAULT_CREDENTIAL: Credential = Credential::new(*b"1234");

impl Credential {
    /// Build a credential from ASCII digits
    ///
    /// In a `const` a non-digit byte fails the build; at runtime it panics. Use
    /// [`Credential::parse`] for input that isn't known to be good.
    pub const fn new(digits: [u8; PIN_LEN]) -> Self {
        let mut i = 0;
        while i < PIN_LEN {
            assert!(digits[i].is_ascii_digit(), "credential must be ASCII digits");
            i += 1;
        }
        Self(digits)
    }

    /// Check and build a credential from a string
    pub fn parse(text: &str) -> Result<Self> {
        let digits: [u8; PIN_LEN] = text
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidCredential)?;

        match digits.iter().all(u8::is_ascii_digit) {
            true => Ok(Self(digits)),
            false => Err(Error::InvalidCredential),
        }
    }

    /// Exact, fixed-length, byte-for-byte comparison with an entry
    ///
    /// An entry with fewer than [`PIN_LEN`] digits never matches.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.as_bytes() == self.0.as_slice()
    }
}

impl Default for Credential {
    fn default() -> Self {
        DEFAULT_CREDENTIAL
    }
}

// keeps the PIN out of logs and panic messages
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(****)")
    }
}

impl TryFrom<&str> for Credential {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

/// Digits typed so far in one session
#[derive(Default)]
pub struct Entry {
    digits: [u8; PIN_LEN],
    len: usize,
}

impl Entry {
    /// An empty entry
    pub const fn new() -> Self {
        Self {
            digits: [0; PIN_LEN],
            len: 0,
        }
    }

    /// Append one ASCII digit
    ///
    /// Returns `false`, leaving the entry untouched, once it is already full.
    pub fn push(&mut self, ascii_digit: u8) -> bool {
        if self.is_complete() {
            return false;
        }
        self.digits[self.len] = ascii_digit;
        self.len += 1;
        true
    }

    /// Number of digits entered
    pub fn len(&self) -> usize {
        self.len
    }

    /// No digit entered yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All [`PIN_LEN`] digits entered
    pub fn is_complete(&self) -> bool {
        self.len == PIN_LEN
    }

    /// The digits entered so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Forget every digit
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
