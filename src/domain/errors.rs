use thiserror::Error;

/// Aggregated validation failure raised when a domain entity is constructed
/// from invalid data.
///
/// Every violated rule is reported, not only the first one found: `issues`
/// holds one human-readable entry per broken rule, in field order. The
/// Display form joins them with `"; "`.
#[derive(Debug, Clone, Error)]
#[error("{}", .issues.join("; "))]
pub struct DomainValidationError {
    pub issues: Vec<String>,
}

impl DomainValidationError {
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }
}
