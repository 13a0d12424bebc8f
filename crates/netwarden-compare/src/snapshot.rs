//! Device snapshot - collected configuration per device and section

use crate::error::DeviceError;
use netwarden_core::{json_kind, Error, Result};
use netwarden_policy::read_json_document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Collected configuration: hostname to section name to config lines.
///
/// Produced by the external collector and read-only during comparison.
/// Hostnames and sections keep their document order.
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    devices: Map<String, Value>,
}

/// Inventory row: the sections a device reported, in snapshot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInventory {
    pub hostname: String,
    pub sections: Vec<String>,
}

impl DeviceSnapshot {
    /// Build a snapshot from a parsed JSON document.
    ///
    /// The document must be an object; individual device entries are
    /// validated lazily so one bad device does not reject the whole snapshot.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(devices) => Ok(Self { devices }),
            other => Err(Error::InvalidSnapshot {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Hostnames in document order
    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(|s| s.as_str())
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.devices.contains_key(hostname)
    }

    /// Section map for a device.
    ///
    /// `Ok(None)` when the device is absent; an error when its entry is not an object.
    pub fn device_sections(
        &self,
        hostname: &str,
    ) -> std::result::Result<Option<&Map<String, Value>>, DeviceError> {
        match self.devices.get(hostname) {
            None => Ok(None),
            Some(Value::Object(sections)) => Ok(Some(sections)),
            Some(other) => Err(DeviceError {
                hostname: hostname.to_string(),
                found: json_kind(other),
            }),
        }
    }

    /// Device/section summary for every well-formed device entry
    pub fn inventory(&self) -> Vec<DeviceInventory> {
        self.devices
            .iter()
            .filter_map(|(hostname, entry)| {
                entry.as_object().map(|sections| DeviceInventory {
                    hostname: hostname.clone(),
                    sections: sections.keys().cloned().collect(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Load a device snapshot from a JSON file
pub async fn load_snapshot_file(path: impl AsRef<Path>) -> Result<DeviceSnapshot> {
    let path = path.as_ref();
    let value = read_json_document(path).await?;
    let snapshot = DeviceSnapshot::from_value(value)?;

    info!(
        "Loaded snapshot with {} devices from {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}
