//! Active-low push button

use embedded_hal::digital::InputPin;

use crate::{error::line, Result};

/// A button wired between the pin and ground, with a pull-up
///
/// The pin reads low while the button is held.
pub struct Button<P: InputPin> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    /// Wrap a pin that is already configured as a pulled-up input
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sample the pin once; `true` while held
    pub fn is_pressed(&mut self) -> Result<bool> {
        self.pin.is_low().map_err(line)
    }

    #[allow(missing_docs)]
    pub fn free(self) -> P {
        self.pin
    }
}
