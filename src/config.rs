//! Build-time settings of the lock

use crate::{
    credential::{Credential, DEFAULT_CREDENTIAL},
    delay::DEFAULT_DELAY_US,
};

/// [`Config`] is the init config of a [`Lock`](crate::lock::Lock)
///
/// One delay unit serves as both the LCD latch settle time and the keypad
/// debounce interval.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    credential: Credential,
    delay_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential: DEFAULT_CREDENTIAL,
            delay_us: DEFAULT_DELAY_US,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_credential(&self) -> Credential {
        self.credential
    }

    pub fn set_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    pub fn get_delay_us(&self) -> u32 {
        self.delay_us
    }

    pub fn set_delay_us(mut self, delay_us: u32) -> Self {
        self.delay_us = delay_us;
        self
    }
}
