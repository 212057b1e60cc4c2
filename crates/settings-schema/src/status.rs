//! Service status maps and readiness requirements.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{CATALOG, ConfigCategory, ServiceName};

/// Backend-reported initialization state per service.
///
/// A service absent from the map is treated as not initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceStatusMap(BTreeMap<ServiceName, bool>);

impl ServiceStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a backend JSON object of `{ <name>: bool }`.
    ///
    /// Names outside the catalog and non-boolean values are not admitted.
    /// `success` is the envelope flag of the set response, not a service.
    pub fn from_wire(object: &Map<String, Value>) -> Self {
        let mut statuses = BTreeMap::new();
        for (name, value) in object {
            if name == "success" {
                continue;
            }
            let Ok(service) = name.parse::<ServiceName>() else {
                tracing::warn!(service = %name, "Ignoring status for unknown service");
                continue;
            };
            match value.as_bool() {
                Some(initialized) => {
                    statuses.insert(service, initialized);
                }
                None => tracing::warn!(%service, "Ignoring non-boolean service status"),
            }
        }
        Self(statuses)
    }

    pub fn insert(&mut self, service: ServiceName, initialized: bool) {
        self.0.insert(service, initialized);
    }

    pub fn is_initialized(&self, service: ServiceName) -> bool {
        self.0.get(&service).copied().unwrap_or(false)
    }

    /// Services from `services` that are not initialized, in input order.
    pub fn failed_among(&self, services: &[ServiceName]) -> Vec<ServiceName> {
        services
            .iter()
            .copied()
            .filter(|s| !self.is_initialized(*s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ServiceName, bool)> for ServiceStatusMap {
    fn from_iter<I: IntoIterator<Item = (ServiceName, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named set of services that must all be initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessRequirement {
    pub name: &'static str,
    pub services: Vec<ServiceName>,
}

impl ReadinessRequirement {
    /// Requirement for reaching the main application.
    pub fn main_gate() -> Self {
        Self {
            name: "main",
            services: CATALOG
                .iter()
                .filter(|e| e.gate_required)
                .map(|e| e.service)
                .collect(),
        }
    }

    /// Requirement for leaving the wizard step bound to `category`.
    pub fn for_step(category: ConfigCategory) -> Self {
        Self {
            name: category.as_str(),
            services: category
                .services()
                .filter(|e| e.step_required)
                .map(|e| e.service)
                .collect(),
        }
    }

    pub fn is_satisfied_by(&self, status: &ServiceStatusMap) -> bool {
        is_ready(status, self)
    }

    /// Required services that are missing or not initialized.
    pub fn unmet(&self, status: &ServiceStatusMap) -> Vec<ServiceName> {
        status.failed_among(&self.services)
    }
}

/// `true` iff every required service maps to `true` in `status`.
pub fn is_ready(status: &ServiceStatusMap, requirement: &ReadinessRequirement) -> bool {
    requirement
        .services
        .iter()
        .all(|service| status.is_initialized(*service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: Value) -> ServiceStatusMap {
        ServiceStatusMap::from_wire(value.as_object().unwrap())
    }

    #[test]
    fn main_gate_requires_symlink_services() {
        let requirement = ReadinessRequirement::main_gate();
        assert_eq!(
            requirement.services,
            vec![ServiceName::Symlink, ServiceName::SymlinkLibrary]
        );
    }

    #[test]
    fn not_ready_when_a_required_service_is_false() {
        let status = wire(json!({ "symlink": false, "symlinklibrary": true }));
        assert!(!is_ready(&status, &ReadinessRequirement::main_gate()));
    }

    #[test]
    fn not_ready_when_a_required_service_is_missing() {
        let status = wire(json!({ "symlinklibrary": true, "core": true }));
        let requirement = ReadinessRequirement::main_gate();
        assert!(!is_ready(&status, &requirement));
        assert_eq!(requirement.unmet(&status), vec![ServiceName::Symlink]);
    }

    #[test]
    fn ready_when_all_required_services_are_true() {
        let status = wire(json!({ "symlink": true, "symlinklibrary": true, "jackett": false }));
        assert!(is_ready(&status, &ReadinessRequirement::main_gate()));
    }

    #[test]
    fn empty_requirement_is_always_ready() {
        let requirement = ReadinessRequirement::for_step(ConfigCategory::Content);
        assert!(requirement.services.is_empty());
        assert!(is_ready(&ServiceStatusMap::new(), &requirement));
    }

    #[test]
    fn from_wire_skips_unknown_names_and_envelope_flag() {
        let status = wire(json!({
            "success": true,
            "jackett": false,
            "mystery_indexer": true,
            "torrentio": "yes",
        }));
        assert_eq!(status.len(), 1);
        assert!(!status.is_initialized(ServiceName::Jackett));
        assert!(!status.is_initialized(ServiceName::Torrentio));
    }

    #[test]
    fn failed_among_counts_absent_as_failed() {
        let status = wire(json!({ "scraping": true }));
        let failed = status.failed_among(&[ServiceName::Scraping, ServiceName::Jackett]);
        assert_eq!(failed, vec![ServiceName::Jackett]);
    }

    #[test]
    fn step_requirements_follow_catalog() {
        assert_eq!(
            ReadinessRequirement::for_step(ConfigCategory::General).services,
            vec![ServiceName::Symlink, ServiceName::SymlinkLibrary]
        );
        assert_eq!(
            ReadinessRequirement::for_step(ConfigCategory::MediaServer).services,
            vec![ServiceName::PlexLibrary]
        );
        assert_eq!(
            ReadinessRequirement::for_step(ConfigCategory::Scrapers).services,
            vec![ServiceName::Scraping]
        );
    }
}
