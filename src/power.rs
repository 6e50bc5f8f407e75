//! Module power gating
//!
//! Boards that wire the module's supply through a GPIO hand the driver an
//! [`EnablePin`]; boards without power gating use [`NoPowerControl`].

use embedded_hal::digital::OutputPin;

/// Electrical level that turns the module on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Driving the pin high powers the module
    #[default]
    ActiveHigh,
    /// Driving the pin low powers the module
    ActiveLow,
}

/// Switches the module's supply.
pub trait PowerControl {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Powers the module on (`true`) or off (`false`).
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

/// Power control for platforms without a power-enable line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPowerControl;

impl PowerControl for NoPowerControl {
    type Error = core::convert::Infallible;

    fn set_enabled(&mut self, _enabled: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Power control through a GPIO enable line.
#[derive(Debug)]
pub struct EnablePin<P> {
    pin: P,
    polarity: Polarity,
}

impl<P> EnablePin<P> {
    /// Wraps an output pin already configured by the HAL.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Releases the underlying pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> PowerControl for EnablePin<P>
where
    P: OutputPin,
{
    type Error = P::Error;

    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        let high = match self.polarity {
            Polarity::ActiveHigh => enabled,
            Polarity::ActiveLow => !enabled,
        };

        if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Pin {
        high: Option<bool>,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = Some(true);
            Ok(())
        }
    }

    #[test]
    fn active_high_drives_pin_high_when_enabled() {
        let mut power = EnablePin::new(Pin::default(), Polarity::ActiveHigh);
        power.set_enabled(true).unwrap();
        assert_eq!(power.pin.high, Some(true));
        power.set_enabled(false).unwrap();
        assert_eq!(power.release().high, Some(false));
    }

    #[test]
    fn active_low_inverts_the_level() {
        let mut power = EnablePin::new(Pin::default(), Polarity::ActiveLow);
        power.set_enabled(true).unwrap();
        assert_eq!(power.pin.high, Some(false));
        power.set_enabled(false).unwrap();
        assert_eq!(power.pin.high, Some(true));
    }
}
