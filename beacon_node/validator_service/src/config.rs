use serde::{Deserialize, Serialize};

pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 16;
pub const DEFAULT_ACTIVATION_STREAM_CAPACITY: usize = 8;

/// Tuning for the `ValidatorServer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the canonical-state broadcast channel. Slow subscribers that fall further
    /// behind than this skip to the latest state.
    pub event_channel_capacity: usize,
    /// Number of activation updates buffered per subscription before the producer waits.
    pub activation_stream_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            activation_stream_capacity: DEFAULT_ACTIVATION_STREAM_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"activation_stream_capacity": 2}"#).unwrap();

        assert_eq!(config.activation_stream_capacity, 2);
        assert_eq!(config.event_channel_capacity, DEFAULT_EVENT_CHANNEL_CAPACITY);
    }
}
