use crate::clock::Sleeper;
use crate::error::SimulationError;
use crate::models::{Device, DeviceKind, DeviceStatus};
use crate::random::{int_in, pick, RandomSource};
use once_cell::sync::Lazy;
use std::time::Duration;

const MANUFACTURERS: [&str; 8] = [
    "Apple", "Samsung", "Dell", "HP", "Lenovo", "TP-Link", "Netgear", "Canon",
];

const GENERATED_KINDS: [DeviceKind; 6] = [
    DeviceKind::Smartphone,
    DeviceKind::Computer,
    DeviceKind::Printer,
    DeviceKind::Router,
    DeviceKind::Tablet,
    DeviceKind::Tv,
];

const LAST_SEEN_LABELS: [&str; 5] = [
    "Just now",
    "1 min ago",
    "5 min ago",
    "1 hour ago",
    "2 hours ago",
];

const HEX_CHARS: &[u8] = b"0123456789ABCDEF";

/// Fallback result for the non-native path. Fixed, never regenerated.
static WEB_FIXTURE: Lazy<Vec<Device>> = Lazy::new(|| {
    vec![Device {
        id: "1".to_string(),
        name: "John's iPhone".to_string(),
        ip: "192.168.1.102".to_string(),
        mac: "00:1B:63:84:45:E6".to_string(),
        manufacturer: "Apple".to_string(),
        kind: DeviceKind::Smartphone,
        status: DeviceStatus::Online,
        last_seen: "Just now".to_string(),
    }]
});

/// Seed inventory shown on the devices screen before any scan has run.
static INVENTORY_FIXTURE: Lazy<Vec<Device>> = Lazy::new(|| {
    vec![
        WEB_FIXTURE[0].clone(),
        Device {
            id: "2".to_string(),
            name: "Maria's Notebook".to_string(),
            ip: "192.168.1.105".to_string(),
            mac: "AA:BB:CC:DD:EE:FF".to_string(),
            manufacturer: "Dell".to_string(),
            kind: DeviceKind::Computer,
            status: DeviceStatus::Online,
            last_seen: "2 min ago".to_string(),
        },
        Device {
            id: "3".to_string(),
            name: "HP Printer".to_string(),
            ip: "192.168.1.108".to_string(),
            mac: "11:22:33:44:55:66".to_string(),
            manufacturer: "HP".to_string(),
            kind: DeviceKind::Printer,
            status: DeviceStatus::Offline,
            last_seen: "1 hour ago".to_string(),
        },
        Device {
            id: "4".to_string(),
            name: "Main Router".to_string(),
            ip: "192.168.1.1".to_string(),
            mac: "AA:11:BB:22:CC:33".to_string(),
            manufacturer: "TP-Link".to_string(),
            kind: DeviceKind::Router,
            status: DeviceStatus::Online,
            last_seen: "Always on".to_string(),
        },
    ]
});

pub fn web_fixture() -> Vec<Device> {
    WEB_FIXTURE.clone()
}

pub fn inventory_fixture() -> Vec<Device> {
    INVENTORY_FIXTURE.clone()
}

/// Artificial scan latencies. The web and native paths carry independent
/// delays, kept from the source application as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub native_delay: Duration,
    pub web_delay: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            native_delay: Duration::from_millis(2000),
            web_delay: Duration::from_millis(3000),
        }
    }
}

/// Simulated device scan.
///
/// The non-native path waits out the web delay and returns the fixed
/// one-element fixture. The native path waits out the native delay and
/// returns a single synthetic record drawn from the injected random source.
/// No real probing happens on either path.
pub async fn run_scan<R, S>(
    is_native: bool,
    config: &ScanConfig,
    rng: &mut R,
    sleeper: &S,
) -> Result<Vec<Device>, SimulationError>
where
    R: RandomSource,
    S: Sleeper + ?Sized,
{
    if !is_native {
        sleeper.sleep(config.web_delay).await;
        return Ok(web_fixture());
    }

    sleeper.sleep(config.native_delay).await;
    Ok(vec![generate_device(rng)])
}

/// One synthetic device record with randomized fields.
pub fn generate_device<R: RandomSource + ?Sized>(rng: &mut R) -> Device {
    Device {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        name: format!("Device-{}", int_in(rng, 0, 1000)),
        ip: format!("192.168.1.{}", int_in(rng, 1, 254)),
        mac: random_mac(rng),
        manufacturer: (*pick(rng, &MANUFACTURERS)).to_string(),
        kind: *pick(rng, &GENERATED_KINDS),
        status: if rng.next_f64() > 0.3 {
            DeviceStatus::Online
        } else {
            DeviceStatus::Offline
        },
        last_seen: (*pick(rng, &LAST_SEEN_LABELS)).to_string(),
    }
}

fn random_mac<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    let mut groups = Vec::with_capacity(6);
    for _ in 0..6 {
        let hi = HEX_CHARS[int_in(rng, 0, 16) as usize] as char;
        let lo = HEX_CHARS[int_in(rng, 0, 16) as usize] as char;
        groups.push(format!("{}{}", hi, lo));
    }
    groups.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::NoopSleeper;
    use crate::random::{ScriptedRandom, ThreadRandom};

    fn is_valid_mac(mac: &str) -> bool {
        let groups: Vec<&str> = mac.split(':').collect();
        groups.len() == 6
            && groups
                .iter()
                .all(|g| g.len() == 2 && g.bytes().all(|b| b.is_ascii_hexdigit()))
    }

    #[tokio::test]
    async fn web_scan_returns_the_fixture_every_time() {
        let config = ScanConfig::default();
        let mut rng = ThreadRandom;

        let first = run_scan(false, &config, &mut rng, &NoopSleeper).await.unwrap();
        let second = run_scan(false, &config, &mut rng, &NoopSleeper).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "1");
        assert_eq!(first[0].ip, "192.168.1.102");
        assert_eq!(first[0].mac, "00:1B:63:84:45:E6");
        assert_eq!(first[0].manufacturer, "Apple");
        assert_eq!(first[0].kind, DeviceKind::Smartphone);
        assert_eq!(first[0].status, DeviceStatus::Online);
        assert_eq!(first[0].last_seen, "Just now");
    }

    #[tokio::test]
    async fn native_scan_yields_one_well_formed_record() {
        let config = ScanConfig::default();
        let mut rng = ThreadRandom;

        for _ in 0..100 {
            let devices = run_scan(true, &config, &mut rng, &NoopSleeper).await.unwrap();
            assert_eq!(devices.len(), 1);
            let device = &devices[0];

            let octet: u32 = device
                .ip
                .strip_prefix("192.168.1.")
                .and_then(|s| s.parse().ok())
                .unwrap();
            assert!((1..=254).contains(&octet), "bad octet in {}", device.ip);
            assert!(is_valid_mac(&device.mac), "bad mac {}", device.mac);
            assert!(MANUFACTURERS.contains(&device.manufacturer.as_str()));
            assert!(GENERATED_KINDS.contains(&device.kind));
            assert!(LAST_SEEN_LABELS.contains(&device.last_seen.as_str()));
        }
    }

    #[test]
    fn generator_boundaries_are_inclusive() {
        let mut low = ScriptedRandom::constant(0.0);
        let device = generate_device(&mut low);
        assert_eq!(device.name, "Device-0");
        assert_eq!(device.ip, "192.168.1.1");
        assert_eq!(device.mac, "00:00:00:00:00:00");
        assert_eq!(device.manufacturer, "Apple");
        // 0.0 is not greater than the 0.3 online threshold
        assert_eq!(device.status, DeviceStatus::Offline);

        let mut high = ScriptedRandom::constant(0.999_999);
        let device = generate_device(&mut high);
        assert_eq!(device.name, "Device-999");
        assert_eq!(device.ip, "192.168.1.254");
        assert_eq!(device.mac, "FF:FF:FF:FF:FF:FF");
        assert_eq!(device.manufacturer, "Canon");
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.last_seen, "2 hours ago");
    }

    #[test]
    fn inventory_fixture_matches_the_dashboard_seed() {
        let inventory = inventory_fixture();
        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory[0], web_fixture()[0]);
        assert_eq!(inventory[3].ip, "192.168.1.1");
        assert_eq!(inventory[3].kind, DeviceKind::Router);
    }
}
