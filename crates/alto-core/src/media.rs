//! ALTO media type constants.

/// Media type for the ALTO directory service.
pub const DIRECTORY: &str = "application/alto-directory+json";
/// Media type for the ALTO map service.
pub const NETWORK_MAP: &str = "application/alto-networkmap+json";
/// Media type for the ALTO map filtering service request body.
pub const NETWORK_MAP_FILTER: &str = "application/alto-networkmapfilter+json";
/// Media type for the ALTO cost map service.
pub const COST_MAP: &str = "application/alto-costmap+json";
/// Media type for the ALTO cost map filtering service request body.
pub const COST_MAP_FILTER: &str = "application/alto-costmapfilter+json";
/// Media type for the ALTO endpoint cost service.
pub const ENDPOINT_COST: &str = "application/alto-endpointcost+json";
/// Media type for the ALTO endpoint cost service request body.
pub const ENDPOINT_COST_PARAMS: &str = "application/alto-endpointcostparams+json";
/// Media type for the ALTO endpoint property service.
pub const ENDPOINT_PROP: &str = "application/alto-endpointprop+json";
/// Media type for the ALTO endpoint property service request body.
pub const ENDPOINT_PROP_PARAMS: &str = "application/alto-endpointpropparams+json";
/// Media type for ALTO error notifications.
pub const ERROR: &str = "application/alto-error+json";

/// The media types a directory resource may declare. Anything else is
/// rejected at directory build time.
pub const RESOURCE_MEDIA_TYPES: [&str; 5] =
    [DIRECTORY, NETWORK_MAP, COST_MAP, ENDPOINT_PROP, ENDPOINT_COST];

/// Returns `true` if `media_type` is a recognized resource media type.
pub fn is_resource_media_type(media_type: &str) -> bool {
    RESOURCE_MEDIA_TYPES.contains(&media_type)
}
