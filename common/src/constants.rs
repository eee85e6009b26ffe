use chrono::Duration;
use once_cell::sync::Lazy;

pub static DURATION: Lazy<Duration> = Lazy::new(|| Duration::days(1));

pub const AUTHORITY_ADMIN: &str = "ROLE_ADMIN";
pub const AUTHORITY_USER: &str = "ROLE_USER";
pub const AUTHORITY_SERVICE: &str = "ROLE_SERVICE";
