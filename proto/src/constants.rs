//! Because consistency is great!

/// Query parameter the identity provider redirect uses to carry an error code.
pub const QUERY_THIRD_PARTY_ERROR: &str = "error";
/// Query parameter carrying the human readable third party error text.
pub const QUERY_THIRD_PARTY_ERROR_DESCRIPTION: &str = "error_description";

/// Component name that selects the login pipeline.
pub const COMPONENT_AUTH: &str = "auth";
/// Component name that selects the profile pipeline.
pub const COMPONENT_PROFILE: &str = "profile";
