use serde::{Deserialize, Serialize};

// Enum to represent the broad category of a discovered device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Smartphone,
    Computer,
    Printer,
    Router,
    Tablet,
    Tv,
    Unknown,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Smartphone => "Smartphone",
            DeviceKind::Computer => "Computer",
            DeviceKind::Printer => "Printer",
            DeviceKind::Router => "Router",
            DeviceKind::Tablet => "Tablet",
            DeviceKind::Tv => "TV",
            DeviceKind::Unknown => "Unknown",
        }
    }
}

// Enum to represent the reachability of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "Online",
            DeviceStatus::Offline => "Offline",
        }
    }
}

// Struct to hold one discovered network device.
// Records are immutable once produced and live only in transient UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub mac: String,
    pub manufacturer: String,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub last_seen: String,
}

// Result of one completed speed-test run, produced atomically at the end.
// No partial or streaming result is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTestResult {
    /// Download rate in Mbps.
    pub download: u32,
    /// Upload rate in Mbps.
    pub upload: u32,
    /// Round-trip latency in milliseconds.
    pub ping: u32,
}

// Snapshot of what the platform connectivity bridge last reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub connected: bool,
    pub connection_type: String,
    pub ssid: Option<String>,
    pub ip_address: Option<String>,
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self {
            connected: false,
            connection_type: "unknown".to_string(),
            ssid: None,
            ip_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_enums_serialize_as_lowercase_labels() {
        let json = serde_json::to_value(DeviceKind::Smartphone).unwrap();
        assert_eq!(json, serde_json::json!("smartphone"));
        let json = serde_json::to_value(DeviceStatus::Offline).unwrap();
        assert_eq!(json, serde_json::json!("offline"));
    }

    #[test]
    fn default_status_reports_unknown_connection() {
        let status = NetworkStatus::default();
        assert!(!status.connected);
        assert_eq!(status.connection_type, "unknown");
        assert_eq!(status.ssid, None);
        assert_eq!(status.ip_address, None);
    }
}
