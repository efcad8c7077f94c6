pub const APP_NAME: &str = "Doctor Meeting Schedule Tracker";

/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const MEETINGS_ROUTE_COMPONENT: &str = "meetings";
pub const MEETINGS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", MEETINGS_ROUTE_COMPONENT);

pub const HOSPITALS_ROUTE_COMPONENT: &str = "hospitals";
pub const HOSPITALS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", HOSPITALS_ROUTE_COMPONENT);

/// Upper bound on generated occurrences when a rule sets neither `count` nor `endDate`.
pub const DEFAULT_MAX_OCCURRENCES: u32 = 100;

pub const NOTES_MAX_LEN: usize = 500;
pub const DOCTOR_NAME_MIN_LEN: usize = 2;
pub const HOSPITAL_NAME_MIN_LEN: usize = 3;
