//! Module bring-up sequence
//!
//! [`Bluetooth::initialize`] walks the module through a fixed list of
//! settings. Every step is logged and recorded in the returned [`Report`];
//! a failed step never stops the sequence, with one exception: if the baud
//! rate cannot be confirmed the link is not trusted for anything else and
//! the run ends there, without a reboot.
//!
//! The connection mode is not configured blindly. It depends on what the
//! module reports about itself:
//!
//! | Firmware         | Stored remote address | Mode        |
//! |------------------|-----------------------|-------------|
//! | contains `6.`    | not queried           | Pairing     |
//! | other            | query failed          | Slave       |
//! | other            | `NOT SET`             | Slave       |
//! | other            | anything else         | Auto-Master |
//!
//! If the firmware version cannot be read, the mode is left alone.

use embedded_hal::delay::DelayNs;

use crate::commands::{
    GetAddress, GetFirmwareVersion, GetRemoteAddress, OperatingMode, Reboot, RemoteAddress,
    SetConfigTimer, SetInquiryWindow, SetMode, SetName, SetPageScanWindow, SetSerializedName,
};
use crate::report::{Outcome, Report};
use crate::{Device, Error, PowerControl, RadioConnection, Settings, Transport};

/// Firmware family that must run in pairing mode.
const PAIRING_FIRMWARE_MARKER: &str = "6.";

/// Whether a firmware banner belongs to the family that needs pairing mode.
pub fn requires_pairing_mode(version: &str) -> bool {
    version.contains(PAIRING_FIRMWARE_MARKER)
}

/// Mode for pre-6.x firmware, given the stored remote address query.
///
/// `None` means the query failed.
pub fn mode_for_remote_address(remote: Option<&RemoteAddress>) -> OperatingMode {
    match remote {
        Some(RemoteAddress::Stored(_)) => OperatingMode::AutoMaster,
        Some(RemoteAddress::NotSet) | None => OperatingMode::Slave,
    }
}

/// Brings up an RN-42 module and controls its power.
pub struct Bluetooth<T, D, P> {
    device: Device<T, D>,
    power: P,
    settings: Settings,
}

impl<T, D, P> Bluetooth<T, D, P> {
    /// Creates the driver. Nothing is sent until [`initialize`](Self::initialize).
    pub fn new(transport: T, delay: D, power: P, settings: Settings) -> Self {
        Self {
            device: Device::new(transport, delay),
            power,
            settings,
        }
    }

    /// Command-level access for exchanges outside the bring-up sequence.
    pub fn device(&mut self) -> &mut Device<T, D> {
        &mut self.device
    }

    /// Values written during bring-up.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Releases the link, delay provider and power control.
    pub fn release(self) -> (T, D, P) {
        let (transport, delay) = self.device.release();
        (transport, delay, self.power)
    }
}

impl<T, D, P> Bluetooth<T, D, P>
where
    T: Transport,
    D: DelayNs,
    P: PowerControl,
{
    /// Powers the module and configures it.
    ///
    /// Never fails: the outcome of each step is logged and returned in the
    /// [`Report`], and reflected in `connection` (an empty `device_id` means
    /// the address could not be read).
    pub fn initialize(&mut self, connection: &mut RadioConnection) -> Report {
        info!("Initializing Bluetooth...");

        // power cycle so the module boots from reset
        self.set_power(false);
        self.set_power(true);

        connection.mark_unknown();
        let report = self.configure(connection);

        // reboot leaves its banner in the input buffer
        if let Err(e) = self.device.clear_input() {
            warn!("Unable to flush UART input ({})", e.kind().as_str());
        }

        info!("Done.");
        report
    }

    /// Powers the module down. No command is sent.
    pub fn deinitialize(&mut self) {
        self.set_power(false);
    }

    fn set_power(&mut self, enabled: bool) {
        let state = if enabled { "on" } else { "off" };
        debug!("Turning Bluetooth {}", state);
        if self.power.set_enabled(enabled).is_err() {
            warn!("Unable to turn Bluetooth {}", state);
        }
    }

    fn configure(&mut self, connection: &mut RadioConnection) -> Report {
        let mut report = Report::default();

        self.device.delay_ms(self.settings.boot_delay_ms);

        let result = self.set_baud_rate(connection.baud_rate);
        report.baud_rate = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Successfully set baud rate to {}", connection.baud_rate),
            Err(e) => {
                warn!(
                    "Unable to set baud rate of attached UART device ({})",
                    e.kind().as_str()
                );
                if self.device.set_local_baud_rate(connection.baud_rate).is_err() {
                    warn!("Unable to restore local baud rate");
                }
                return report;
            }
        }

        let name = self.settings.device_name;
        let result = if self.settings.serialized_name {
            self.device.execute_command(SetSerializedName { name })
        } else {
            self.device.execute_command(SetName { name })
        };
        report.name = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Successfully set Bluetooth device name to {}", name),
            Err(e) => warn!("Unable to set Bluetooth device name ({})", e.kind().as_str()),
        }

        let result = self.device.execute_command(GetAddress);
        report.device_id = Outcome::of(&result);
        match result {
            Ok(address) => {
                debug!("Bluetooth MAC is {}", address.as_str());
                connection.device_id = address;
            }
            Err(e) => {
                warn!("Unable to get Bluetooth MAC ({})", e.kind().as_str());
                connection.device_id.clear();
            }
        }

        let seconds = self.settings.configuration_timer;
        let result = self.device.execute_command(SetConfigTimer { seconds });
        report.configuration_timer = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Set remote configuration timer to {}", seconds),
            Err(e) => warn!(
                "Unable to set remote configuration timer ({})",
                e.kind().as_str()
            ),
        }

        let window = self.settings.inquiry_window;
        let result = self.device.execute_command(SetInquiryWindow { window });
        report.inquiry_window = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Changed Bluetooth inquiry window to {}", window),
            Err(e) => warn!(
                "Unable to change Bluetooth inquiry window ({})",
                e.kind().as_str()
            ),
        }

        let window = self.settings.page_scan_window;
        let result = self.device.execute_command(SetPageScanWindow { window });
        report.page_scan_window = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Changed Bluetooth page scan window to {}", window),
            Err(e) => warn!(
                "Unable to change Bluetooth page scan window ({})",
                e.kind().as_str()
            ),
        }

        let result = self.device.execute_command(GetFirmwareVersion);
        report.firmware_version = Outcome::of(&result);
        match result {
            Ok(version) => {
                info!("Bluetooth module is running firmware {}", version.as_str());
                let mode = self.select_mode(&version, &mut report);
                report.selected_mode = Some(mode);
                report.firmware = Some(version);

                let result = self.device.execute_command(SetMode { mode });
                report.mode = Outcome::of(&result);
                match result {
                    Ok(()) => debug!("Changed Bluetooth device mode to {:?}", mode),
                    Err(e) => warn!(
                        "Unable to change Bluetooth device mode ({})",
                        e.kind().as_str()
                    ),
                }
            }
            Err(e) => warn!(
                "Unable to determine Bluetooth module firmware version ({})",
                e.kind().as_str()
            ),
        }

        let result = self.device.execute_command(Reboot);
        report.reboot = Outcome::of(&result);
        match result {
            Ok(()) => debug!("Rebooted Bluetooth module"),
            Err(e) => warn!("No reboot confirmation ({})", e.kind().as_str()),
        }

        report
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Error<T::Error>> {
        self.device.enter_command_mode(baud)?;
        self.device.set_baud_rate(baud)
    }

    fn select_mode(&mut self, version: &str, report: &mut Report) -> OperatingMode {
        if requires_pairing_mode(version) {
            debug!("Bluetooth device is on 6.x firmware - switching to pairing mode");
            return OperatingMode::Pairing;
        }

        debug!("Bluetooth device is on 4.x firmware");

        let result = self.device.execute_command(GetRemoteAddress);
        report.remote_address = Outcome::of(&result);
        let remote = match result {
            Ok(remote) => Some(remote),
            Err(e) => {
                warn!(
                    "Unable to get currently stored remote BT address ({})",
                    e.kind().as_str()
                );
                None
            }
        };

        report.remote_address_stored = matches!(remote, Some(RemoteAddress::Stored(_)));
        let mode = mode_for_remote_address(remote.as_ref());
        match mode {
            OperatingMode::AutoMaster => {
                debug!("Remote BT address stored - switching to auto-connect master mode")
            }
            _ => debug!("No remote BT address stored - switching to slave mode"),
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Reply;

    fn stored(address: &str) -> RemoteAddress {
        let mut reply = Reply::new();
        reply.push_str(address).unwrap();
        RemoteAddress::Stored(reply)
    }

    #[test]
    fn six_x_firmware_needs_pairing_mode() {
        assert!(requires_pairing_mode("Ver 6.15 04/26/2013"));
        assert!(requires_pairing_mode("v6.15"));
        assert!(!requires_pairing_mode("Ver 4.77 RN-42 01/05/2010"));
    }

    #[test]
    fn marker_is_a_plain_substring() {
        // any "6." counts, even outside the version number
        assert!(requires_pairing_mode("Ver 4.77 build 16.2"));
        assert!(!requires_pairing_mode("Ver 6-15"));
    }

    #[test]
    fn remote_address_decides_mode() {
        assert_eq!(mode_for_remote_address(None), OperatingMode::Slave);
        assert_eq!(
            mode_for_remote_address(Some(&RemoteAddress::NotSet)),
            OperatingMode::Slave
        );
        assert_eq!(
            mode_for_remote_address(Some(&stored("00:11:22:33:44:55"))),
            OperatingMode::AutoMaster
        );
    }
}
