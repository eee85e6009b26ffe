use std::env::var;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref PROTOCOL: String = var("PROTOCOL").unwrap_or_else(|_| "http".to_string());
    pub static ref API_PREFIX: String = var("API_PREFIX").unwrap_or_else(|_| "api".to_string());
    pub static ref APPLICATION_NAME: String =
        var("APPLICATION_NAME").unwrap_or_else(|_| "reportApp".to_string());
    pub static ref REPORT_SERVICE: String =
        var("REPORT_SERVICE_URL").unwrap_or_else(|_| "localhost:3011".to_string());
}

pub const REPORT_ENTITY: &str = "report";
