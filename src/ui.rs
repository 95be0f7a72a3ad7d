use crate::bridge::{DesktopBridge, PlatformBridge, StatusSubscription};
use crate::models::{Device, DeviceKind, DeviceStatus, NetworkStatus};
use crate::network::SimulatorHub;
use crate::scanner;
use eframe::egui;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Mocked latency samples shown on the device-detail view.
const PING_HISTORY: [u32; 7] = [15, 12, 18, 14, 16, 13, 17];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Scanner,
    Speed,
    Devices,
    Settings,
}

pub struct NetScoutApp {
    bridge: Arc<DesktopBridge>,
    hub: SimulatorHub,
    tab: Tab,

    // Devices tab
    inventory: Vec<Device>,
    search: String,
    selected_device: Option<String>,
    editing_name: bool,
    name_buffer: String,

    // Settings tab
    simulate_native: bool,
    simulate_connected: bool,
    auto_refresh: bool,
    last_scan: Instant,

    // Last snapshot pushed by the bridge subscription
    network_status: Arc<Mutex<NetworkStatus>>,
    _status_sub: StatusSubscription,
}

impl NetScoutApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let bridge = Arc::new(DesktopBridge::new());

        let network_status = Arc::new(Mutex::new(bridge.network_status()));
        let snapshot = Arc::clone(&network_status);
        let status_sub = bridge.subscribe(Box::new(move |status| {
            *snapshot.lock().unwrap() = status.clone();
        }));

        let simulate_connected = bridge.network_status().connected;
        let hub = SimulatorHub::new(Arc::clone(&bridge) as Arc<dyn PlatformBridge>);

        Self {
            bridge,
            hub,
            tab: Tab::Scanner,
            inventory: scanner::inventory_fixture(),
            search: String::new(),
            selected_device: None,
            editing_name: false,
            name_buffer: String::new(),
            simulate_native: false,
            simulate_connected,
            auto_refresh: false,
            last_scan: Instant::now(),
            network_status,
            _status_sub: status_sub,
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(10.0);

            // Title
            ui.heading("🖧 NetScout");
            ui.add_space(20.0);
            ui.label("Monitor the devices on your network");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(10.0);

                // Connection status from the bridge snapshot
                let status = self.network_status.lock().unwrap().clone();
                if status.connected {
                    ui.colored_label(egui::Color32::GREEN, "● Connected");
                } else {
                    ui.colored_label(egui::Color32::from_rgb(200, 50, 50), "● Disconnected");
                }
                ui.add_space(10.0);

                if self.simulate_native {
                    ui.colored_label(egui::Color32::from_rgb(0, 120, 215), "🚀 Native mode");
                }
            });
        });

        ui.add_space(5.0);
        ui.separator();
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(5.0);
            for (tab, label) in [
                (Tab::Scanner, "🔍 Scanner"),
                (Tab::Speed, "⚡ Speed"),
                (Tab::Devices, "🖳 Devices"),
                (Tab::Settings, "⚙ Settings"),
            ] {
                if ui.selectable_label(self.tab == tab, label).clicked() {
                    self.tab = tab;
                }
                ui.add_space(5.0);
            }
        });
        ui.separator();
    }

    fn render_scanner_tab(&mut self, ui: &mut egui::Ui) {
        let scanning = self.hub.is_scanning();
        let devices = self.hub.devices.lock().unwrap().clone();

        ui.add_space(15.0);

        if devices.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(if scanning {
                        "Scanning network..."
                    } else {
                        "Discover devices"
                    })
                    .size(18.0)
                    .strong(),
                );
                ui.add_space(5.0);
                ui.label(if scanning {
                    "Finding every device connected to your network"
                } else {
                    "Tap to start a full scan of the local network"
                });
                ui.add_space(15.0);

                if scanning {
                    ui.spinner();
                    ui.add_space(15.0);
                }

                if ui
                    .add_sized(
                        [160.0, 35.0],
                        egui::Button::new(
                            egui::RichText::new(if scanning {
                                "⏳ Scanning..."
                            } else {
                                "🔍 Start Scan"
                            })
                            .color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(0, 120, 215)),
                    )
                    .clicked()
                    && !scanning
                {
                    self.hub.start_scan();
                    self.last_scan = Instant::now();
                }
            });
        } else {
            ui.horizontal(|ui| {
                ui.add_space(5.0);
                ui.label(
                    egui::RichText::new(format!("Devices found ({})", devices.len()))
                        .size(16.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(5.0);
                    if ui.button("🗘 New Scan").clicked() {
                        self.hub.clear_scan_results();
                    }
                });
            });
            ui.add_space(5.0);
            render_device_table(ui, &devices, &mut None);
        }
    }

    fn render_speed_tab(&mut self, ui: &mut egui::Ui) {
        let running = self.hub.is_testing_speed();
        let progress = *self.hub.speed_progress.lock().unwrap();
        let result = *self.hub.speed_result.lock().unwrap();

        ui.add_space(15.0);

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("Speed Test").size(18.0).strong());
            ui.add_space(5.0);
            ui.label("Measure your connection speed");
            ui.add_space(15.0);

            if running {
                if let Some(update) = progress {
                    ui.label(egui::RichText::new(update.phase.label()).size(16.0));
                    ui.add_space(10.0);
                    ui.add(
                        egui::ProgressBar::new(f32::from(update.percent) / 100.0)
                            .desired_width(320.0),
                    );
                    ui.label(format!("{}%", update.percent));
                } else {
                    ui.spinner();
                }
            } else if let Some(result) = result {
                ui.colored_label(
                    egui::Color32::from_rgb(50, 150, 50),
                    egui::RichText::new("Test complete!").size(16.0).strong(),
                );
                ui.add_space(10.0);

                render_result_card(ui, "⬇ Download", &format!("{} Mbps", result.download));
                ui.add_space(5.0);
                render_result_card(ui, "⬆ Upload", &format!("{} Mbps", result.upload));
                ui.add_space(5.0);
                render_result_card(ui, "⚡ Ping", &format!("{} ms", result.ping));

                ui.add_space(15.0);
                if ui.button("🗘 New Test").clicked() {
                    self.hub.clear_speed_result();
                }
            } else if ui
                .add_sized(
                    [160.0, 35.0],
                    egui::Button::new(
                        egui::RichText::new("⚡ Start Test").color(egui::Color32::WHITE),
                    )
                    .fill(egui::Color32::from_rgb(0, 120, 215)),
                )
                .clicked()
            {
                self.hub.start_speed_test();
            }
        });
    }

    fn render_devices_tab(&mut self, ui: &mut egui::Ui) {
        if let Some(id) = self.selected_device.clone() {
            self.render_device_details(ui, &id);
            return;
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.add_space(5.0);
            ui.label("🔍");
            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search by name, IP or manufacturer")
                    .desired_width(300.0),
            );
        });
        ui.add_space(10.0);

        let query = self.search.to_lowercase();
        let filtered: Vec<Device> = self
            .inventory
            .iter()
            .filter(|d| {
                query.is_empty()
                    || d.name.to_lowercase().contains(&query)
                    || d.ip.contains(&query)
                    || d.manufacturer.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();

        ui.horizontal(|ui| {
            ui.add_space(5.0);
            ui.label(
                egui::RichText::new(format!("Network devices ({})", filtered.len()))
                    .size(16.0)
                    .strong(),
            );
        });
        ui.add_space(5.0);

        let mut open_details = None;
        render_device_table(ui, &filtered, &mut Some(&mut open_details));
        if let Some(id) = open_details {
            self.name_buffer.clear();
            self.editing_name = false;
            self.selected_device = Some(id);
        }
    }

    fn render_device_details(&mut self, ui: &mut egui::Ui, id: &str) {
        let Some(device) = self.inventory.iter().find(|d| d.id == id).cloned() else {
            self.selected_device = None;
            return;
        };

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.add_space(5.0);
            if ui.button("⬅ Back").clicked() {
                self.selected_device = None;
                self.editing_name = false;
            }
            ui.add_space(10.0);
            ui.label(egui::RichText::new("Device details").size(18.0).strong());
        });
        ui.add_space(15.0);

        // Name, with inline editing saved to in-memory state only
        ui.horizontal(|ui| {
            ui.add_space(5.0);
            if self.editing_name {
                ui.add(
                    egui::TextEdit::singleline(&mut self.name_buffer).desired_width(220.0),
                );
                if ui.button("✔").clicked() {
                    let name = self.name_buffer.trim().to_string();
                    if !name.is_empty() {
                        if let Some(entry) = self.inventory.iter_mut().find(|d| d.id == id) {
                            entry.name = name;
                        }
                    }
                    self.editing_name = false;
                }
                if ui.button("✖").clicked() {
                    self.editing_name = false;
                }
            } else {
                ui.label(egui::RichText::new(&device.name).size(16.0).strong());
                if ui.button("✏").clicked() {
                    self.name_buffer = device.name.clone();
                    self.editing_name = true;
                }
            }

            ui.add_space(10.0);
            let (color, label) = match device.status {
                DeviceStatus::Online => (egui::Color32::from_rgb(50, 150, 50), "Online"),
                DeviceStatus::Offline => (egui::Color32::from_rgb(100, 100, 100), "Offline"),
            };
            ui.colored_label(color, label);
        });
        ui.add_space(10.0);

        // Network info
        egui::Frame::none()
            .fill(egui::Color32::from_rgb(240, 240, 240))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200)))
            .inner_margin(15.0)
            .show(ui, |ui| {
                ui.set_width(420.0);
                ui.vertical(|ui| {
                    detail_row(ui, "IP Address", &device.ip);
                    detail_row(ui, "MAC Address", &device.mac);
                    detail_row(ui, "Manufacturer", &device.manufacturer);
                    detail_row(ui, "Type", device.kind.as_str());
                    detail_row(ui, "Last seen", &device.last_seen);
                });
            });
        ui.add_space(10.0);

        // Latency history
        let average =
            (PING_HISTORY.iter().sum::<u32>() as f64 / PING_HISTORY.len() as f64).round() as u32;
        egui::Frame::none()
            .fill(egui::Color32::from_rgb(240, 240, 240))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200)))
            .inner_margin(15.0)
            .show(ui, |ui| {
                ui.set_width(420.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("📈 Ping history").strong());
                    ui.add_space(5.0);
                    ui.horizontal(|ui| {
                        for sample in PING_HISTORY {
                            ui.label(egui::RichText::new(format!("{}ms", sample)).size(12.0));
                        }
                    });
                    ui.add_space(5.0);
                    ui.label(format!("Average: {} ms", average));
                });
            });
    }

    fn render_settings_tab(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.add_space(5.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new("Simulation").size(16.0).strong());
                ui.add_space(5.0);

                if ui
                    .checkbox(&mut self.simulate_native, "🚀 Simulate native platform")
                    .changed()
                {
                    self.bridge.set_native(self.simulate_native);
                }

                if ui
                    .checkbox(&mut self.simulate_connected, "📶 Connected")
                    .changed()
                {
                    let status = if self.simulate_connected {
                        NetworkStatus {
                            connected: true,
                            connection_type: "wifi".to_string(),
                            ssid: Some("HomeNet".to_string()),
                            ip_address: Some("192.168.1.100".to_string()),
                        }
                    } else {
                        NetworkStatus {
                            connected: false,
                            connection_type: "none".to_string(),
                            ssid: None,
                            ip_address: None,
                        }
                    };
                    self.bridge.set_status(status);
                }

                if ui.checkbox(&mut self.auto_refresh, "🗘 Auto-refresh scan").clicked()
                    && self.auto_refresh
                {
                    self.last_scan = Instant::now();
                }

                ui.add_space(15.0);
                ui.label(egui::RichText::new("Network status").size(16.0).strong());
                ui.add_space(5.0);

                let status = self.network_status.lock().unwrap().clone();
                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(240, 240, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200)))
                    .inner_margin(15.0)
                    .show(ui, |ui| {
                        ui.set_width(420.0);
                        ui.vertical(|ui| {
                            detail_row(
                                ui,
                                "Connected",
                                if status.connected { "yes" } else { "no" },
                            );
                            detail_row(ui, "Connection type", &status.connection_type);
                            detail_row(ui, "SSID", status.ssid.as_deref().unwrap_or("—"));
                            detail_row(
                                ui,
                                "Local IP",
                                status.ip_address.as_deref().unwrap_or("—"),
                            );
                        });
                    });
            });
        });
    }
}

fn kind_icon(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Smartphone => "📱",
        DeviceKind::Computer => "🖳",
        DeviceKind::Printer => "🖨",
        DeviceKind::Router => "📡",
        DeviceKind::Tablet => "📲",
        DeviceKind::Tv => "📺",
        DeviceKind::Unknown => "🖴",
    }
}

fn render_result_card(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(240, 240, 240))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 200, 200)))
        .inner_margin(15.0)
        .show(ui, |ui| {
            ui.set_width(320.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(label).strong());
                ui.label(
                    egui::RichText::new(value)
                        .size(20.0)
                        .color(egui::Color32::from_rgb(0, 120, 215)),
                );
            });
        });
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).strong().size(12.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).size(12.0));
        });
    });
}

// Shared device table. When `details` is provided each row grows a button
// that reports the clicked device id back to the caller.
fn render_device_table(
    ui: &mut egui::Ui,
    devices: &[Device],
    details: &mut Option<&mut Option<String>>,
) {
    // Table header
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(245, 245, 245))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(10.0);
                ui.label(egui::RichText::new("Device").strong().size(12.0));
                ui.add_space(120.0);
                ui.label(egui::RichText::new("IP Address").strong().size(12.0));
                ui.add_space(60.0);
                ui.label(egui::RichText::new("MAC Address").strong().size(12.0));
                ui.add_space(60.0);
                ui.label(egui::RichText::new("Manufacturer").strong().size(12.0));
                ui.add_space(40.0);
                ui.label(egui::RichText::new("Status").strong().size(12.0));
                ui.add_space(40.0);
                ui.label(egui::RichText::new("Last Seen").strong().size(12.0));
            });
        });

    ui.separator();

    // Table content with scrollable area
    egui::ScrollArea::vertical()
        .max_height(400.0)
        .show(ui, |ui| {
            for (idx, device) in devices.iter().enumerate() {
                let bg_color = if idx % 2 == 0 {
                    egui::Color32::from_rgb(255, 255, 255)
                } else {
                    egui::Color32::from_rgb(250, 250, 250)
                };

                egui::Frame::none().fill(bg_color).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add_space(10.0);

                        ui.label(kind_icon(device.kind));
                        ui.label(egui::RichText::new(&device.name).size(12.0));
                        ui.add_space(60.0);

                        ui.label(egui::RichText::new(&device.ip).size(12.0));
                        ui.add_space(40.0);

                        ui.label(egui::RichText::new(&device.mac).size(12.0));
                        ui.add_space(40.0);

                        ui.label(egui::RichText::new(&device.manufacturer).size(12.0));
                        ui.add_space(40.0);

                        let status_color = match device.status {
                            DeviceStatus::Online => egui::Color32::from_rgb(50, 150, 50),
                            DeviceStatus::Offline => egui::Color32::from_rgb(100, 100, 100),
                        };
                        ui.colored_label(status_color, device.status.as_str());
                        ui.add_space(40.0);

                        ui.label(egui::RichText::new(&device.last_seen).size(12.0));

                        if let Some(target) = details.as_deref_mut() {
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.add_space(10.0);
                                    if ui.small_button("Details").clicked() {
                                        *target = Some(device.id.clone());
                                    }
                                },
                            );
                        }
                    });
                });

                ui.add_space(2.0);
            }
        });
}

impl eframe::App for NetScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-refresh logic
        if self.auto_refresh
            && self.last_scan.elapsed() >= Duration::from_secs(60)
            && !self.hub.is_scanning()
        {
            self.hub.start_scan();
            self.last_scan = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);

            self.render_header(ui);
            ui.add_space(5.0);

            self.render_tab_bar(ui);
            ui.add_space(10.0);

            match self.tab {
                Tab::Scanner => self.render_scanner_tab(ui),
                Tab::Speed => self.render_speed_tab(ui),
                Tab::Devices => self.render_devices_tab(ui),
                Tab::Settings => self.render_settings_tab(ui),
            }
        });

        // Request repaint for smooth updates
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
