//! Declarative scenario registration metadata.
//!
//! Scenarios do not validate their own environment. Instead, each one
//! publishes a [`ScenarioSpec`] describing what it needs (backend services,
//! authenticated users, input resolution) and what the harness must sweep
//! afterwards. The harness reads these records before invoking the body.

/// Backend services that must be present for a scenario to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Service {
    Compute,
    Image,
}

/// Resource namespaces the harness sweeps after a scenario run, regardless
/// of whether the run succeeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CleanupScope {
    Compute,
}

/// Concrete reference kinds an input conversion can resolve to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Flavor,
}

/// A declared mapping from a human-supplied logical parameter (e.g. an image
/// name) to a concrete backend reference. Resolution happens in the harness
/// before the scenario body is invoked; bodies only ever see resolved refs.
#[derive(Copy, Clone, Debug)]
pub struct InputConversion {
    pub param: &'static str,
    pub kind: ResourceKind,
}

/// Registration metadata for a single scenario.
#[derive(Clone, Debug)]
pub struct ScenarioSpec {
    /// Unique scenario name, used for discovery and reporting.
    pub name: &'static str,
    pub required_services: &'static [Service],
    /// Whether authenticated users must exist in the harness context.
    pub requires_users: bool,
    pub cleanup: &'static [CleanupScope],
    pub conversions: &'static [InputConversion],
}

impl ScenarioSpec {
    pub fn converts(&self, param: &str) -> Option<ResourceKind> {
        self.conversions
            .iter()
            .find(|c| c.param == param)
            .map(|c| c.kind)
    }
}
