use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

/// Interpretation of a cost metric: real-valued or rank-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Costs are finite real numbers; lower is cheaper.
    Numerical,
    /// Costs are positive integer ranks; lower is better.
    Ordinal,
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostMode::Numerical => write!(f, "numerical"),
            CostMode::Ordinal => write!(f, "ordinal"),
        }
    }
}

impl FromStr for CostMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numerical" => Ok(CostMode::Numerical),
            "ordinal" => Ok(CostMode::Ordinal),
            other => Err(CoreError::InvalidCostMode(other.to_string())),
        }
    }
}

/// A combination of cost metric and cost mode, as advertised in the
/// directory's `meta.cost-types` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostType {
    /// The metric being measured, e.g. "routingcost" or "hopcount".
    #[serde(rename = "cost-metric")]
    pub metric: String,
    /// How values of this metric are to be interpreted.
    #[serde(rename = "cost-mode")]
    pub mode: CostMode,
    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CostType {
    /// Create a new cost type without a description.
    pub fn new(mode: CostMode, metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            mode,
            description: None,
        }
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode, self.metric)
    }
}

/// A single cost table entry.
///
/// Numerical values must be finite; ordinal values are ranks starting at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostValue {
    Numerical(f64),
    Ordinal(u64),
}

impl CostValue {
    /// Validate a raw number against the given mode.
    ///
    /// Numerical values must be finite. Ordinal values must be integral
    /// and at least 1.
    pub fn from_number(mode: CostMode, raw: f64) -> Result<Self, CoreError> {
        match mode {
            CostMode::Numerical => {
                if raw.is_finite() {
                    Ok(CostValue::Numerical(raw))
                } else {
                    Err(CoreError::InvalidCostValue { mode, raw })
                }
            }
            CostMode::Ordinal => {
                if raw.is_finite() && raw >= 1.0 && raw.fract() == 0.0 {
                    Ok(CostValue::Ordinal(raw as u64))
                } else {
                    Err(CoreError::InvalidCostValue { mode, raw })
                }
            }
        }
    }

    /// The mode this value was validated under.
    pub fn mode(&self) -> CostMode {
        match self {
            CostValue::Numerical(_) => CostMode::Numerical,
            CostValue::Ordinal(_) => CostMode::Ordinal,
        }
    }
}

impl fmt::Display for CostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostValue::Numerical(v) => write!(f, "{}", v),
            CostValue::Ordinal(r) => write!(f, "{}", r),
        }
    }
}

impl Serialize for CostValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CostValue::Numerical(v) => serializer.serialize_f64(*v),
            CostValue::Ordinal(r) => serializer.serialize_u64(*r),
        }
    }
}

/// The catalog of registered cost types, keyed by unique name.
///
/// This is the `meta.cost-types` object of the information resource
/// directory. Cost types are immutable once registered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTypeCatalog {
    types: BTreeMap<String, CostType>,
}

impl CostTypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cost type under a unique name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        cost_type: CostType,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(CoreError::DuplicateCostType(name));
        }
        self.types.insert(name, cost_type);
        Ok(())
    }

    /// Look up a cost type by name.
    pub fn get(&self, name: &str) -> Option<&CostType> {
        self.types.get(name)
    }

    /// Find the first registered name matching the given mode and metric.
    pub fn find(&self, mode: CostMode, metric: &str) -> Option<(&str, &CostType)> {
        self.types
            .iter()
            .find(|(_, ct)| ct.mode == mode && ct.metric == metric)
            .map(|(name, ct)| (name.as_str(), ct))
    }

    /// Iterate over all registered (name, cost type) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CostType)> {
        self.types.iter()
    }

    /// Number of registered cost types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no cost types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
