// Role names as they travel over the wire.
pub const PODCASTERS: &str = "podcasters";
pub const COMEDIANS: &str = "comedians";
pub const MUSICIANS: &str = "musicians";
pub const ARTIST: &str = "artist";

/// Role attached to registrations when the application type is not configured.
pub const DEFAULT_ROLE: &str = ARTIST;

// Redirect targets and well-known routes.
pub const ROUTE_ROOT: &str = "/";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_REGISTER: &str = "/register";
pub const ROUTE_DASHBOARD: &str = "/dashboard";
pub const ROUTE_VERIFY_PROFILE: &str = "/verify-profile";
pub const ROUTE_VALIDATE_MOBILE: &str = "/validate-mobile";
pub const ROUTE_BLOCKED: &str = "/blocked";

// Translation keys.
pub const MSG_VERIFY_EMAIL_SENT: &str = "verify_email_sent";
pub const MSG_COUNTRIES_UNAVAILABLE: &str = "countries_unavailable";
