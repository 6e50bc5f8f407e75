//! Serial link abstraction
//!
//! The driver never touches UART registers itself. Platforms implement
//! [`Transport`] over whatever serial peripheral they have; the only hard
//! requirement is that [`Transport::read`] gives up after a bounded time.

/// Byte-oriented serial link to the module.
pub trait Transport {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Writes all of `bytes` to the link.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads a single byte.
    ///
    /// Returns `Ok(None)` once the link has been idle for the platform's read
    /// timeout. Implementations must never block indefinitely.
    fn read(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Reconfigures the local UART to `baud` bits per second.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Discards any input already buffered by the link.
    fn clear(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T> Transport for &mut T
where
    T: Transport + ?Sized,
{
    type Error = T::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, bytes)
    }

    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        T::read(self)
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        T::set_baud_rate(self, baud)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        T::clear(self)
    }
}
