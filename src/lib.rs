#![no_std]
//! RN-42 Bluetooth Module Driver
//!
//! This crate brings a Roving Networks RN-42 class Bluetooth module from an
//! unknown or factory state into a known operating mode over its UART, using
//! the module's AT-style command set.
//!
//! # Features
//! - Baud rate discovery and configuration
//! - Device naming with optional address suffix
//! - Inquiry and page scan window configuration
//! - Connection mode selection based on firmware version and bonding state
//! - Optional power gating through a GPIO enable line
//! - Logging through `defmt` or `log`
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Command executor over the serial link
//!   - Encodes requests and classifies replies
//!   - Finds the rate the module is listening at
//!
//! - [`commands`]: One type per AT command
//!   - [`commands::system`]: Command mode, baud rate, timers, reboot
//!   - [`commands::identity`]: Name, address and firmware queries
//!   - [`commands::radio`]: Scan windows and connection mode
//!
//! - [`sequencer`]: The bring-up sequence built on top of [`Device`]
//!
//! # Usage
//! Platforms supply a [`Transport`] for the UART, an
//! [`embedded_hal::delay::DelayNs`] and a [`PowerControl`]. The main entry
//! point is [`Bluetooth`], which runs the bring-up sequence:
//!
//! 1. Power the module and wait for it to boot
//! 2. Enter command mode and confirm the baud rate
//! 3. Set name, read address, disable remote configuration
//! 4. Set inquiry and page scan windows
//! 5. Read firmware version and choose a connection mode
//! 6. Reboot to apply
//!
//! # Important Notes
//! - Bring-up never returns an error; inspect the [`Report`] or the log
//! - A failed baud rate step ends the sequence without a reboot
//! - Only one command is ever in flight
//!
//! # Example
//! ```no_run
//! use embedded_hal::delay::DelayNs;
//! use rn42::{Bluetooth, NoPowerControl, RadioConnection, Settings, Transport};
//!
//! fn bring_up<T: Transport, D: DelayNs>(uart: T, delay: D) -> RadioConnection {
//!     let mut bluetooth = Bluetooth::new(uart, delay, NoPowerControl, Settings::default());
//!     let mut connection = RadioConnection::new(115_200);
//!
//!     let report = bluetooth.initialize(&mut connection);
//!     if report.selected_mode.is_none() {
//!         // mode could not be decided, module keeps its previous mode
//!     }
//!
//!     connection
//! }
//! ```

#[macro_use]
mod fmt;

pub mod commands;
pub mod connection;
pub mod device;
pub mod error;
pub mod power;
pub mod report;
pub mod sequencer;
pub mod settings;
pub mod transport;

pub use commands::{OperatingMode, RemoteAddress};
pub use connection::RadioConnection;
pub use device::Device;
pub use error::{Error, ErrorKind};
pub use power::{EnablePin, NoPowerControl, Polarity, PowerControl};
pub use report::{Outcome, Report};
pub use sequencer::Bluetooth;
pub use settings::Settings;
pub use transport::Transport;
