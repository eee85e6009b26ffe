pub mod access_rules;
pub mod api;
pub mod auth;
pub mod constants;
pub mod context;
pub mod data_utils;
pub mod entities;
pub mod error;
pub mod header_util;
pub mod pagination;
pub mod repository;
pub mod services;

#[macro_export]
macro_rules! impl_has_last_modified {
    ($t:ty) => {
        impl $crate::repository::HasLastModified for $t {
            fn last_modified(&self) -> i64 {
                self.last_modified
            }

            fn set_last_modified(&mut self, value: i64) {
                self.last_modified = value;
            }
        }
    };
}

pub fn default_timestamp() -> i64 {
    chrono::Utc::now().timestamp_micros()
}
