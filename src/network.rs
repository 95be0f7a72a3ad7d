use crate::bridge::PlatformBridge;
use crate::clock::TokioSleeper;
use crate::models::{Device, SpeedTestResult};
use crate::random::ThreadRandom;
use crate::scanner::{self, ScanConfig};
use crate::speedtest::{self, PhaseProgress};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Shared state and spawn points for the two simulators.
///
/// The UI reads the `Arc<Mutex<...>>` fields every frame; the spawned tasks
/// write them when a run finishes.
pub struct SimulatorHub {
    bridge: Arc<dyn PlatformBridge>,
    scan_config: ScanConfig,
    pub devices: Arc<Mutex<Vec<Device>>>,
    pub scanning: Arc<Mutex<bool>>,
    pub speed_running: Arc<Mutex<bool>>,
    pub speed_progress: Arc<Mutex<Option<PhaseProgress>>>,
    pub speed_result: Arc<Mutex<Option<SpeedTestResult>>>,
}

impl SimulatorHub {
    pub fn new(bridge: Arc<dyn PlatformBridge>) -> Self {
        Self {
            bridge,
            scan_config: ScanConfig::default(),
            devices: Arc::new(Mutex::new(Vec::new())),
            scanning: Arc::new(Mutex::new(false)),
            speed_running: Arc::new(Mutex::new(false)),
            speed_progress: Arc::new(Mutex::new(None)),
            speed_result: Arc::new(Mutex::new(None)),
        }
    }

    /// Kick off a simulated scan on the runtime. No-op while one is running.
    pub fn start_scan(&self) {
        {
            let mut scanning = self.scanning.lock().unwrap();
            if *scanning {
                return;
            }
            *scanning = true;
        }

        let devices = Arc::clone(&self.devices);
        let scanning = Arc::clone(&self.scanning);
        let is_native = self.bridge.is_native();
        let config = self.scan_config;

        tokio::spawn(async move {
            // Clear previous results
            devices.lock().unwrap().clear();

            let mut rng = ThreadRandom;
            match scanner::run_scan(is_native, &config, &mut rng, &TokioSleeper).await {
                Ok(found) => {
                    log::info!("scan finished, {} device(s)", found.len());
                    *devices.lock().unwrap() = found;
                }
                Err(e) => {
                    log::error!("scan failed: {}", e);
                    devices.lock().unwrap().clear();
                }
            }

            *scanning.lock().unwrap() = false;
        });
    }

    /// Kick off a simulated speed test. No-op while one is running.
    pub fn start_speed_test(&self) {
        {
            let mut running = self.speed_running.lock().unwrap();
            if *running {
                return;
            }
            *running = true;
        }

        let running = Arc::clone(&self.speed_running);
        let progress = Arc::clone(&self.speed_progress);
        let result = Arc::clone(&self.speed_result);
        let is_native = self.bridge.is_native();

        *result.lock().unwrap() = None;
        *progress.lock().unwrap() = None;

        let (tx, mut rx) = mpsc::unbounded_channel();

        // Forward phase progress into the frame-polled slot.
        let progress_slot = Arc::clone(&progress);
        tokio::spawn(async move {
            while let Some(update) = rx.recv().await {
                *progress_slot.lock().unwrap() = Some(update);
            }
        });

        tokio::spawn(async move {
            let mut rng = ThreadRandom;
            match speedtest::run_speed_test(is_native, &mut rng, &TokioSleeper, &tx).await {
                Ok(measured) => {
                    log::info!(
                        "speed test finished: {} Mbps down / {} Mbps up / {} ms",
                        measured.download,
                        measured.upload,
                        measured.ping
                    );
                    *result.lock().unwrap() = Some(measured);
                }
                Err(e) => {
                    log::error!("speed test failed: {}", e);
                }
            }

            *progress.lock().unwrap() = None;
            *running.lock().unwrap() = false;
        });
    }

    pub fn is_scanning(&self) -> bool {
        *self.scanning.lock().unwrap()
    }

    pub fn is_testing_speed(&self) -> bool {
        *self.speed_running.lock().unwrap()
    }

    pub fn clear_scan_results(&self) {
        self.devices.lock().unwrap().clear();
    }

    pub fn clear_speed_result(&self) {
        *self.speed_result.lock().unwrap() = None;
    }
}
