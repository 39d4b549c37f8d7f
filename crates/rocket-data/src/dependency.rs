//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// Remote dependencies the cart consults.
///
/// Each tag carries a default timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Product master data.
    Catalog,
    /// Stock availability checks.
    Inventory,
}

impl DependencyTag {
    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(3000),
            Self::Inventory => Duration::from_millis(2000),
        }
    }

    /// Path segment of the endpoint serving this dependency.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Catalog => "products",
            Self::Inventory => "stock",
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Inventory => "inventory",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
