//! Report pages: the update form, its route resolver and HTTP service.

pub mod resolve;
pub mod service;
pub mod update;

pub use resolve::{ReportResolve, RouteData};
pub use service::{ReportGateway, ReportService};
pub use update::{ReportUpdate, UploadError};
