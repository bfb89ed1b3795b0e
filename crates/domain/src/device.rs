//! Device: one Just Add Power transmitter or receiver on the LAN.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AvDashError, ValidationError};

/// Parse operator or configuration input into an IP address.
///
/// Surrounding whitespace is not tolerated: the text must be the address and
/// nothing else.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAddress`] when `raw` is not a
/// well-formed IPv4 or IPv6 address.
pub fn parse_address(raw: &str) -> Result<IpAddr, ValidationError> {
    IpAddr::from_str(raw).map_err(|_| ValidationError::InvalidAddress(raw.to_string()))
}

/// Which side of the AV link a device sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Source-side encoder (TX).
    Tx,
    /// Sink-side decoder (RX).
    Rx,
}

impl DeviceKind {
    /// Upper-case badge text (`TX` / `RX`).
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Tx => "TX",
            Self::Rx => "RX",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tx => f.write_str("tx"),
            Self::Rx => f.write_str("rx"),
        }
    }
}

/// Free-form grouping tag for where a device is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Bowling,
    Neoverse,
    Attic,
    Other,
}

impl Location {
    /// Every location, in tab order.
    pub const ALL: [Self; 4] = [Self::Bowling, Self::Neoverse, Self::Attic, Self::Other];

    /// Tag used in URLs and configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bowling => "bowling",
            Self::Neoverse => "neoverse",
            Self::Attic => "attic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or(())
    }
}

/// Last known reachability of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Answered the last probe. Also the optimistic value before any probe.
    #[default]
    Online,
    /// Did not answer the last probe.
    Offline,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// A roster entry.
///
/// `ip` is the unique key. `device_id` is a human label printed on the unit
/// (`TX2`, `RX60`, …) and is not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub ip: IpAddr,
    pub name: String,
    pub model: String,
    #[serde(rename = "id")]
    pub device_id: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub location: Location,
    #[serde(default)]
    pub status: DeviceStatus,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AvDashError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), AvDashError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Whether `needle` (already lower-cased) occurs in the name, address or
    /// device id.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.ip.to_string().contains(needle)
            || self.device_id.to_lowercase().contains(needle)
    }

    /// URL of the device's own web interface.
    #[must_use]
    pub fn web_ui_url(&self) -> String {
        match self.ip {
            IpAddr::V4(ip) => format!("http://{ip}"),
            IpAddr::V6(ip) => format!("http://[{ip}]"),
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    ip: Option<String>,
    name: Option<String>,
    model: Option<String>,
    device_id: Option<String>,
    kind: Option<DeviceKind>,
    location: Option<Location>,
    status: DeviceStatus,
}

impl DeviceBuilder {
    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// Missing kind defaults to receiver and missing location to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`AvDashError::Validation`] if the address is malformed or the
    /// name is missing.
    pub fn build(self) -> Result<Device, AvDashError> {
        let ip = parse_address(self.ip.as_deref().unwrap_or_default())?;
        let device = Device {
            ip,
            name: self.name.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            device_id: self.device_id.unwrap_or_default(),
            kind: self.kind.unwrap_or(DeviceKind::Rx),
            location: self.location.unwrap_or(Location::Other),
            status: self.status,
        };
        device.validate()?;
        Ok(device)
    }
}
