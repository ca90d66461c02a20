//! Measurement-id sourcing.
//!
//! Every published record carries an opaque correlation id (`mesid`). Where
//! that id comes from depends on how the prober is invoked: the CLI passes
//! a fixed value, while an embedding driver framework exposes it through a
//! capability map. The caller picks the source explicitly; nothing here
//! inspects the ambient environment.

use std::collections::HashMap;

/// Returned when a capability map does not carry a measurement id.
pub const UNDEFINED_MEASUREMENT_ID: &str = "UNDEFINED";

/// Capability key holding the measurement id inside a capability group.
pub const TEST_ID_KEY: &str = "testId";

pub trait MeasurementSource {
    fn measurement_id(&self) -> String;
}

/// Fixed measurement id, used by the CLI (`--mesid`, default `"U"`).
#[derive(Debug, Clone)]
pub struct StaticSource(String);

impl StaticSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl MeasurementSource for StaticSource {
    fn measurement_id(&self) -> String {
        self.0.clone()
    }
}

/// Measurement id looked up from a driver capability map: the `testId`
/// entry inside a named capability group. A missing group or missing entry
/// yields [`UNDEFINED_MEASUREMENT_ID`].
#[derive(Debug, Clone)]
pub struct CapabilitySource {
    capabilities: HashMap<String, HashMap<String, String>>,
    group: String,
}

impl CapabilitySource {
    pub fn new(capabilities: HashMap<String, HashMap<String, String>>, group: impl Into<String>) -> Self {
        Self {
            capabilities,
            group: group.into(),
        }
    }
}

impl MeasurementSource for CapabilitySource {
    fn measurement_id(&self) -> String {
        self.capabilities
            .get(&self.group)
            .and_then(|group| group.get(TEST_ID_KEY))
            .cloned()
            .unwrap_or_else(|| UNDEFINED_MEASUREMENT_ID.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_returns_configured_id() {
        assert_eq!(StaticSource::new("U").measurement_id(), "U");
    }

    #[test]
    fn capability_source_reads_test_id() {
        let mut group = HashMap::new();
        group.insert(TEST_ID_KEY.to_string(), "mes-42".to_string());
        let mut capabilities = HashMap::new();
        capabilities.insert("syntheticCapability".to_string(), group);

        let source = CapabilitySource::new(capabilities, "syntheticCapability");
        assert_eq!(source.measurement_id(), "mes-42");
    }

    #[test]
    fn missing_group_falls_back_to_undefined() {
        let source = CapabilitySource::new(HashMap::new(), "syntheticCapability");
        assert_eq!(source.measurement_id(), UNDEFINED_MEASUREMENT_ID);
    }

    #[test]
    fn missing_test_id_falls_back_to_undefined() {
        let mut capabilities = HashMap::new();
        capabilities.insert("syntheticCapability".to_string(), HashMap::new());

        let source = CapabilitySource::new(capabilities, "syntheticCapability");
        assert_eq!(source.measurement_id(), UNDEFINED_MEASUREMENT_ID);
    }
}
