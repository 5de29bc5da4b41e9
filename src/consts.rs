/// Smallest valid year (1 CE in the proleptic Gregorian calendar)
pub const MIN_YEAR: u64 = 1;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u64 = 400;

/// Default value of the `Access-Control-Allow-Origin` response header
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
/// Default upper bound on the number of years a single range request may span
pub const DEFAULT_MAX_RANGE_SPAN: u64 = 10_000;

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const HEADER_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Query parameter carrying the year on GET requests
pub const YEAR_QUERY_PARAM: &str = "year";
