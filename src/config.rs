use serde::{Deserialize, Serialize};

use crate::encoder::BUS_SPEED_HZ;

/// Pixels the probe frame is sized for. Strings longer than this report
/// an indeterminate count. Above ~158 pixels the probe frame no longer fits
/// in one default-sized spidev message.
pub const DEFAULT_PROBE_CAPACITY: usize = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default = "default_probe_capacity")]
    pub probe_capacity: usize,
    /// Used when probing cannot determine the count
    #[serde(default)]
    pub led_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusConfig {
    pub device: String,
    /// SPI mode, 0 through 3
    pub mode: u8,
    pub bits_per_word: u8,
    pub speed_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: BusConfig::default(),
            probe_capacity: DEFAULT_PROBE_CAPACITY,
            led_count: None,
        }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            device: "/dev/spidev0.0".to_string(),
            mode: 0,
            bits_per_word: 8,
            speed_hz: BUS_SPEED_HZ,
        }
    }
}

fn default_probe_capacity() -> usize {
    DEFAULT_PROBE_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bus.device, "/dev/spidev0.0");
        assert_eq!(config.bus.mode, 0);
        assert_eq!(config.bus.bits_per_word, 8);
        assert_eq!(config.bus.speed_hz, 7_800_000);
        assert_eq!(config.probe_capacity, DEFAULT_PROBE_CAPACITY);
        assert_eq!(config.led_count, None);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = serde_json::from_str(
            r#"{"bus": {"device": "/dev/spidev1.0"}, "led_count": 30, "probe_capacity": 300}"#,
        )
        .unwrap();
        assert_eq!(config.bus.device, "/dev/spidev1.0");
        assert_eq!(config.bus.speed_hz, 7_800_000);
        assert_eq!(config.led_count, Some(30));
        assert_eq!(config.probe_capacity, 300);
    }
}
