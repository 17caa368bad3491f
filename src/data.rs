//! Built-in catalogs and catalog resolution.
//!
//! Both catalogs ship as literal data and are materialised lazily on first
//! use. A config file may point either catalog at an external TOML/JSON file
//! instead; [`Catalogs::resolve`] applies those overrides and the configured
//! page sizes.

use crate::catalog::{Catalog, CatalogError};
use crate::config::BrowserConfig;
use crate::types::{Difficulty, Module, Project, TutorialSection};
use std::path::Path;
use std::sync::LazyLock;

/// Items per page in the project hub.
pub const PROJECT_PAGE_SIZE: usize = 6;

static MODULES: LazyLock<Catalog<Module>> = LazyLock::new(|| Catalog::new(module_entries()));

static PROJECTS: LazyLock<Catalog<Project>> = LazyLock::new(|| {
    Catalog::new(project_entries())
        .with_page_size(crate::paginate::PageSize::from_count(PROJECT_PAGE_SIZE))
});

/// The library hub: 13 modules, unpaginated.
pub fn modules() -> &'static Catalog<Module> {
    &MODULES
}

/// The project hub: 15 tutorials, six per page.
pub fn projects() -> &'static Catalog<Project> {
    &PROJECTS
}

/// The pair of catalogs a front-end works with.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub modules: Catalog<Module>,
    pub projects: Catalog<Project>,
}

impl Catalogs {
    /// Built-in data with the stock page sizes.
    pub fn builtin() -> Self {
        Self {
            modules: modules().clone(),
            projects: projects().clone(),
        }
    }

    /// Apply config overrides. Relative `source` paths resolve against `root`
    /// (the directory holding `config.toml`).
    pub fn resolve(config: &BrowserConfig, root: &Path) -> Result<Self, CatalogError> {
        let modules = match &config.modules.source {
            Some(source) => Catalog::load(&root.join(source))?,
            None => modules().clone(),
        };
        let projects = match &config.projects.source {
            Some(source) => Catalog::load(&root.join(source))?,
            None => projects().clone(),
        };
        Ok(Self {
            modules: modules.with_page_size(config.modules.pagination()),
            projects: projects.with_page_size(config.projects.pagination()),
        })
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn section(title: &str, content: &str) -> TutorialSection {
    TutorialSection {
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn module(file: &str, name: &str, description: &str, category: &str) -> Module {
    Module {
        file: file.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}

fn module_entries() -> Vec<Module> {
    vec![
        module(
            "GhostHub_Core.zip",
            "GhostHub Core",
            "Central coordinator firmware that pairs nodes, relays telemetry and exposes the hub dashboard.",
            "Hub",
        ),
        module(
            "DHT_Sensor.zip",
            "DHT11/DHT22 Sensor",
            "Temperature and humidity driver with automatic sensor type detection.",
            "Sensor",
        ),
        module(
            "BME280.zip",
            "BME280 Environmental",
            "Pressure, temperature and humidity over I2C or SPI with altitude estimation.",
            "Sensor",
        ),
        module(
            "MFRC522.zip",
            "MFRC522 (RFID)",
            "Read and write 13.56MHz MIFARE tags for access control and asset tracking.",
            "Security",
        ),
        module(
            "INA219.zip",
            "INA219 Power Monitor",
            "High-side current and bus voltage measurement for battery powered nodes.",
            "Power",
        ),
        module(
            "PCA9685_Servo.zip",
            "PCA9685 Servo Driver",
            "Sixteen channel PWM expander for servos and LED dimming over I2C.",
            "Actuator",
        ),
        module(
            "A4988_Stepper.zip",
            "A4988 Stepper",
            "Microstepping stepper motor control with acceleration profiles.",
            "Actuator",
        ),
        module(
            "SSD1306_OLED.zip",
            "SSD1306 OLED",
            "Monochrome 128x64 display driver with text, shapes and bitmap helpers.",
            "UI",
        ),
        module(
            "TFT_Touch.zip",
            "TFT Touch Display",
            "Colour TFT rendering with resistive touch calibration and widgets.",
            "UI",
        ),
        module(
            "MQTT_Client.zip",
            "MQTT Client",
            "Lightweight publish/subscribe client with automatic reconnect and last will support.",
            "Network",
        ),
        module(
            "Async_WebServer.zip",
            "Async Web Server",
            "Non-blocking HTTP and WebSocket server for ESP32 dashboards.",
            "Network",
        ),
        module(
            "IR_Remote.zip",
            "IR Remote",
            "Decode and transmit infrared remote codes (NEC, RC5, Sony).",
            "Control",
        ),
        module(
            "Rotary_Encoder.zip",
            "Rotary Encoder",
            "Debounced quadrature encoder input with push button events.",
            "Control",
        ),
    ]
}

fn project_entries() -> Vec<Project> {
    vec![
        Project {
            slug: "esp32-web-server-outputs".to_string(),
            name: "ESP32 Web Server: Control Outputs".to_string(),
            description: "Learn how to build a simple web server with the ESP32 to control GPIOs from anywhere in your local network.".to_string(),
            category: "Web Server".to_string(),
            difficulty: Difficulty::Beginner,
            requirements: strings(&["ESP32 Add-on in Arduino IDE", "Basic understanding of HTML/CSS"]),
            components: strings(&["ESP32 DevKit", "2x LEDs", "2x 220 Ohm Resistors", "Breadboard", "Jumper Wires"]),
            instructions: strings(&[
                "Connect the LEDs to GPIO 26 and 27 through resistors.",
                "Copy the provided code to your Arduino IDE.",
                "Enter your WiFi credentials.",
                "Upload the code and open the Serial Monitor to find the IP address.",
            ]),
            sections: vec![
                section(
                    "Project Overview",
                    "This project creates a web server that hosts a simple web page. When you click buttons on the page, the ESP32 receives the request and toggles the state of the connected LEDs.",
                ),
                section(
                    "How it Works",
                    "The ESP32 uses the WiFi.h library to connect to your network. It then listens for incoming HTTP requests on port 80. When a client (like your phone or computer) connects, it serves a string containing HTML code.",
                ),
            ],
            code: Some(
                r#"#include <WiFi.h>

const char* ssid = "YOUR_SSID";
const char* password = "YOUR_PASSWORD";

WiFiServer server(80);

void setup() {
  Serial.begin(115200);
  pinMode(26, OUTPUT);
  pinMode(27, OUTPUT);
  WiFi.begin(ssid, password);
  while (WiFi.status() != WL_CONNECTED) { delay(500); }
  server.begin();
}

void loop() {
  WiFiClient client = server.available();
  if (client) {
    // Handle HTTP requests here
  }
}"#
                .to_string(),
            ),
            diagram_url: None,
        },
        Project {
            slug: "esp32-dht-web-server".to_string(),
            name: "ESP32 DHT Web Server: Temp & Humidity".to_string(),
            description: "Monitor your environment in real-time. This project shows temperature and humidity readings on a web page.".to_string(),
            category: "Sensors".to_string(),
            difficulty: Difficulty::Beginner,
            requirements: strings(&["DHT Sensor Library", "Adafruit Unified Sensor Library"]),
            components: strings(&["ESP32", "DHT11 or DHT22", "10k Ohm Resistor"]),
            instructions: strings(&[
                "Connect DHT DATA pin to GPIO 4.",
                "Install the required libraries in Arduino IDE.",
                "Upload the sketch and navigate to the IP address displayed.",
            ]),
            sections: vec![section(
                "Hardware Setup",
                "Connect the VCC to 3.3V, GND to GND, and Data pin to GPIO 4. If using a DHT22 without a built-in resistor, add a 10k resistor between VCC and Data.",
            )],
            code: Some(
                r#"#include "DHT.h"
#define DHTPIN 4
#define DHTTYPE DHT22
DHT dht(DHTPIN, DHTTYPE);

void setup() {
  dht.begin();
}"#
                .to_string(),
            ),
            diagram_url: None,
        },
        Project {
            slug: "esp32-mqtt-adafruit-io".to_string(),
            name: "ESP32 MQTT: Connect to Adafruit IO".to_string(),
            description: "Send sensor data to the cloud using MQTT. Learn how to integrate ESP32 with Adafruit IO dashboards.".to_string(),
            category: "Cloud/IoT".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["Adafruit IO Account", "Adafruit MQTT Library"]),
            components: strings(&["ESP32", "Any sensor (e.g., Potentiometer)"]),
            instructions: strings(&[
                "Create an account on Adafruit IO.",
                "Create a new feed and dashboard.",
                "Configure your AIO Key and Username in the code.",
                "Publish data every 10 seconds.",
            ]),
            sections: vec![section(
                "MQTT Protocol",
                "MQTT is a lightweight messaging protocol for small sensors and mobile devices, optimized for high-latency or unreliable networks.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-deep-sleep-timer".to_string(),
            name: "ESP32 Deep Sleep: Power Management".to_string(),
            description: "Optimize power consumption by putting the ESP32 into deep sleep and waking it up with a timer.".to_string(),
            category: "Power Management".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["ESP32 Power consumption basics"]),
            components: strings(&["ESP32", "Multimeter (optional for testing)"]),
            instructions: strings(&[
                "Define the sleep duration in microseconds.",
                "Call the deep sleep function in your loop.",
                "Observe the low power state using a multimeter.",
            ]),
            sections: vec![section(
                "Why Deep Sleep?",
                "In deep sleep mode, the ESP32 consumes only a few microamps, making it ideal for battery-powered IoT nodes.",
            )],
            code: Some(
                r#"#define uS_TO_S_FACTOR 1000000ULL
#define TIME_TO_SLEEP  5

void setup(){
  esp_sleep_enable_timer_wakeup(TIME_TO_SLEEP * uS_TO_S_FACTOR);
  esp_deep_sleep_start();
}"#
                .to_string(),
            ),
            diagram_url: None,
        },
        Project {
            slug: "esp32-esp-now-intro".to_string(),
            name: "ESP-NOW: Peer-to-Peer Communication".to_string(),
            description: "Communicate between two ESP32 boards without the need for a WiFi router.".to_string(),
            category: "Communication".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["Two ESP32 boards"]),
            components: strings(&["2x ESP32"]),
            instructions: strings(&[
                "Find the MAC address of the receiver.",
                "Configure the sender with the receivers MAC address.",
                "Register callback functions for sending/receiving.",
            ]),
            sections: vec![section(
                "What is ESP-NOW?",
                "ESP-NOW is a connectionless communication protocol developed by Espressif that enables short packet transmission between ESP boards.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-cam-surveillance".to_string(),
            name: "ESP32-CAM: Video Streaming Server".to_string(),
            description: "Turn your ESP32-CAM into a surveillance camera with a web interface for real-time video streaming.".to_string(),
            category: "Video".to_string(),
            difficulty: Difficulty::Advanced,
            requirements: strings(&["ESP32-CAM Board", "FTDI Programmer"]),
            components: strings(&["ESP32-CAM", "FTDI Adapter", "Female-to-Female Jumpers"]),
            instructions: strings(&[
                "Connect ESP32-CAM to FTDI (VCC to 5V, GND to GND, TX to RX, RX to TX).",
                "Select \"AI Thinker ESP32-CAM\" in Board Manager.",
                "GPIO 0 must be connected to GND for flashing.",
                "Remove GPIO 0 from GND after uploading to run.",
            ]),
            sections: vec![section(
                "Camera Configuration",
                "The ESP32-CAM has a specialized library \"esp_camera.h\" that handles the initialization and frame capture from the OV2640 module.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-lora-long-range".to_string(),
            name: "ESP32 LoRa: Long Range Communication".to_string(),
            description: "Send data over kilometers with low power using LoRa transceivers (RFM95/SX1276).".to_string(),
            category: "Communication".to_string(),
            difficulty: Difficulty::Advanced,
            requirements: strings(&["2x LoRa Modules", "LoRa Library"]),
            components: strings(&["2x ESP32", "2x RFM95 Modules", "2x Antennas"]),
            instructions: strings(&[
                "Wire the RFM95 to ESP32 SPI pins (SCK, MISO, MOSI, CS).",
                "Connect NSS, RST, and DIO0 pins.",
                "Ensure you use the correct frequency (e.g., 433MHz or 868MHz).",
            ]),
            sections: vec![section(
                "LoRa Modulation",
                "LoRa (Long Range) is a spread spectrum modulation technique derived from chirp spread spectrum (CSS) technology.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-ble-server-scanner".to_string(),
            name: "ESP32 BLE: Scanner and Client".to_string(),
            description: "Discover nearby Bluetooth Low Energy devices and read their services.".to_string(),
            category: "Communication".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["BLE Basics"]),
            components: strings(&["ESP32"]),
            instructions: strings(&[
                "Initialize the BLE device name.",
                "Start the BLE scan.",
                "Identify services by UUID.",
            ]),
            sections: vec![section(
                "BLE vs Classic",
                "BLE is designed for low power consumption, while maintaining a similar communication range to Classic Bluetooth.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-spiffs-data-logging".to_string(),
            name: "ESP32 SPIFFS: Logging Data to Flash".to_string(),
            description: "Store sensor readings and configuration files directly on the ESP32 internal flash memory.".to_string(),
            category: "Data Storage".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["SPIFFS Library (deprecated in some versions, transition to LittleFS advised)"]),
            components: strings(&["ESP32"]),
            instructions: strings(&[
                "Mount the SPIFFS filesystem.",
                "Open files in write/append mode to log data.",
                "Read files back to process logged information.",
            ]),
            sections: vec![section(
                "Flash Memory",
                "SPIFFS allows you to use the flash memory like a standard file system with folders and files.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-littlefs-web-interface".to_string(),
            name: "ESP32 LittleFS: Web Form and Config".to_string(),
            description: "Create a web server where you can input settings that persist after a reboot using LittleFS.".to_string(),
            category: "Web Server".to_string(),
            difficulty: Difficulty::Advanced,
            requirements: strings(&["LittleFS for ESP32", "ESPAsyncWebServer"]),
            components: strings(&["ESP32"]),
            instructions: strings(&[
                "Create an index.html file saved in the LittleFS partition.",
                "Use GET/POST requests to send form data to the ESP32.",
                "Save parameters to a JSON or text file.",
            ]),
            sections: vec![section(
                "Why LittleFS?",
                "LittleFS is a small, fail-safe filesystem designed for microcontrollers, replacing the older SPIFFS.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-fauxmo-alexa".to_string(),
            name: "ESP32 Alexa Control: Voice Automation".to_string(),
            description: "Control your lights and appliances with Alexa voice commands without using external clouds.".to_string(),
            category: "Home Automation".to_string(),
            difficulty: Difficulty::Advanced,
            requirements: strings(&["fauxmoESP Library", "Amazon Alexa Device"]),
            components: strings(&["ESP32", "Relay Module"]),
            instructions: strings(&[
                "Add virtual devices in the code.",
                "Discover devices using the Alexa App or \"Alexa, discover devices\".",
                "Control via voice command: \"Alexa, turn on the light\".",
            ]),
            sections: vec![section(
                "Local Emulation",
                "fauxmoESP emulates a Belkin WeMo device, allowing local control from Amazon Alexa.",
            )],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-google-assistant-ifttt".to_string(),
            name: "ESP32 Google Assistant: via IFTTT".to_string(),
            description: "Connect Google Assistant to your ESP32 through IFTTT and Webhooks for global control.".to_string(),
            category: "Home Automation".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["IFTTT Account", "Google Home App"]),
            components: strings(&["ESP32"]),
            instructions: strings(&[
                "Setup IFTTT with Google Assistant as the trigger.",
                "Use Webhooks as the action to send a request to your ESP32 (requires DDNS or Port Forwarding).",
                "Alternatively, use MQTT for a more reliable cloud connection.",
            ]),
            sections: vec![],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-pir-motion-notifier".to_string(),
            name: "ESP32 PIR: Motion Email Notifier".to_string(),
            description: "Build a security system that sends an email notification when motion is detected.".to_string(),
            category: "Security".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["ESP Mail Client Library", "SMTP Account"]),
            components: strings(&["ESP32", "PIR Motion Sensor", "LED for status"]),
            instructions: strings(&[
                "Wire PIR OUT to GPIO 13.",
                "Setup an SMTP server (like Gmail App Password).",
                "Configure the ESP32 to send an email on high signal from PIR.",
            ]),
            sections: vec![],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-rfid-entry-system".to_string(),
            name: "ESP32 RFID: NFC Entry System".to_string(),
            description: "Control access to your room or office using RFID tags and an electronic strike.".to_string(),
            category: "Security".to_string(),
            difficulty: Difficulty::Intermediate,
            requirements: strings(&["MFRC522 Library"]),
            components: strings(&["ESP32", "MFRC522 RFID Module", "Electronic Lock/Relay"]),
            instructions: strings(&[
                "Connect MFRC522 via SPI (SS: 5, RST: 22).",
                "Read the UID of your tags.",
                "Compare UID with a whitelist to trigger the relay.",
            ]),
            sections: vec![],
            code: None,
            diagram_url: None,
        },
        Project {
            slug: "esp32-ble-environmental-beacon".to_string(),
            name: "ESP32 BLE: Environmental Beacon".to_string(),
            description: "Broadcast sensor data (Temp/Humidity) via BLE advertising packets without active connection.".to_string(),
            category: "Sensors".to_string(),
            difficulty: Difficulty::Advanced,
            requirements: strings(&["BLE Advertising knowledge"]),
            components: strings(&["ESP32", "BME280 Sensor"]),
            instructions: strings(&[
                "Gather BME280 data.",
                "Encode data into the BLE advertising payload.",
                "Scan with a mobile app (e.g., nRF Connect) to see live data.",
            ]),
            sections: vec![],
            code: None,
            diagram_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::PageSize;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_catalogs_are_well_formed() {
        modules().validate().unwrap();
        projects().validate().unwrap();
    }

    #[test]
    fn builtin_sizes() {
        assert_eq!(modules().len(), 13);
        assert_eq!(projects().len(), 15);
    }

    #[test]
    fn builtin_pagination_policies() {
        assert_eq!(modules().page_size(), PageSize::Unpaginated);
        assert_eq!(projects().page_size(), PageSize::from_count(6));
    }

    #[test]
    fn project_categories_in_first_occurrence_order() {
        assert_eq!(
            projects().categories(),
            [
                "All",
                "Web Server",
                "Sensors",
                "Cloud/IoT",
                "Power Management",
                "Communication",
                "Video",
                "Data Storage",
                "Home Automation",
                "Security",
            ]
        );
    }

    #[test]
    fn module_categories_in_first_occurrence_order() {
        assert_eq!(
            modules().categories(),
            [
                "All", "Hub", "Sensor", "Security", "Power", "Actuator", "UI", "Network", "Control",
            ]
        );
    }

    #[test]
    fn every_project_has_components_and_instructions() {
        for project in projects().all() {
            assert!(!project.components.is_empty(), "{}", project.slug);
            assert!(!project.instructions.is_empty(), "{}", project.slug);
        }
    }

    #[test]
    fn resolve_without_overrides_uses_builtin_with_configured_sizes() {
        let mut config = BrowserConfig::default();
        config.projects.page_size = 4;
        config.modules.page_size = Some(5);
        let tmp = TempDir::new().unwrap();
        let catalogs = Catalogs::resolve(&config, tmp.path()).unwrap();
        assert_eq!(catalogs.projects.len(), 15);
        assert_eq!(catalogs.projects.page_size(), PageSize::from_count(4));
        assert_eq!(catalogs.modules.page_size(), PageSize::from_count(5));
    }

    #[test]
    fn resolve_loads_relative_source() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("modules.json"),
            r#"[{"file": "one.zip", "name": "One", "category": "Hub"}]"#,
        )
        .unwrap();
        let mut config = BrowserConfig::default();
        config.modules.source = Some("modules.json".into());
        let catalogs = Catalogs::resolve(&config, tmp.path()).unwrap();
        assert_eq!(catalogs.modules.len(), 1);
        assert_eq!(catalogs.projects.len(), 15);
    }

    #[test]
    fn resolve_propagates_load_errors() {
        let tmp = TempDir::new().unwrap();
        let mut config = BrowserConfig::default();
        config.projects.source = Some("missing.toml".into());
        let result = Catalogs::resolve(&config, tmp.path());
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
