use serde::{Deserialize, Serialize};

/// Capabilities of a cost map or endpoint cost resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCapabilities {
    /// Names (catalog keys) of the cost types this resource serves.
    #[serde(rename = "cost-type-names")]
    pub cost_type_names: Vec<String>,
    /// Whether the resource accepts constraint predicates.
    #[serde(rename = "cost-constraints", default)]
    pub cost_constraints: bool,
}

/// Capabilities of an endpoint property resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCapabilities {
    /// Property type names this resource can look up.
    #[serde(rename = "prop-types")]
    pub prop_types: Vec<String>,
}

/// The capability set a resource advertises in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capabilities {
    Cost(CostCapabilities),
    Property(PropertyCapabilities),
}

impl Capabilities {
    /// The cost capabilities, if this is a cost-serving resource.
    pub fn as_cost(&self) -> Option<&CostCapabilities> {
        match self {
            Capabilities::Cost(c) => Some(c),
            Capabilities::Property(_) => None,
        }
    }

    /// The property capabilities, if this is a property-serving resource.
    pub fn as_property(&self) -> Option<&PropertyCapabilities> {
        match self {
            Capabilities::Property(p) => Some(p),
            Capabilities::Cost(_) => None,
        }
    }
}

/// An information resource advertised in the directory.
///
/// Resources are immutable once the directory is built; the directory keeps
/// them in registration order for deterministic output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,
    #[serde(rename = "media-type")]
    pub media_type: String,
    /// Media type of the request body, for request-bodied resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
}

impl Resource {
    /// Create a resource with no accepts media type and no capabilities.
    pub fn new(uri: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            media_type: media_type.into(),
            accepts: None,
            capabilities: None,
        }
    }

    /// Declare the request body media type this resource accepts.
    pub fn with_accepts(mut self, accepts: impl Into<String>) -> Self {
        self.accepts = Some(accepts.into());
        self
    }

    /// Attach cost capabilities.
    pub fn with_cost_capabilities(
        mut self,
        cost_type_names: Vec<String>,
        cost_constraints: bool,
    ) -> Self {
        self.capabilities = Some(Capabilities::Cost(CostCapabilities {
            cost_type_names,
            cost_constraints,
        }));
        self
    }

    /// Attach endpoint property capabilities.
    pub fn with_property_capabilities(mut self, prop_types: Vec<String>) -> Self {
        self.capabilities = Some(Capabilities::Property(PropertyCapabilities { prop_types }));
        self
    }

    /// The advertised cost capabilities, if any.
    pub fn cost_capabilities(&self) -> Option<&CostCapabilities> {
        self.capabilities.as_ref().and_then(Capabilities::as_cost)
    }

    /// The advertised property capabilities, if any.
    pub fn property_capabilities(&self) -> Option<&PropertyCapabilities> {
        self.capabilities.as_ref().and_then(Capabilities::as_property)
    }
}
