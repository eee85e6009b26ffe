//! Client-side controllers for the report application: the report update
//! form, its HTTP service, and the shared pieces the pages are built from.

pub mod entities;
pub mod home;
pub mod shared;
