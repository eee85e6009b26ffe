use serde::{Deserialize, Serialize};

use crate::{
    api::report::PublicReport,
    impl_has_last_modified,
    repository::Entity,
};

/// Stored form of a report. `logo` holds base64 text and travels together
/// with `logo_content_type`, though nothing here enforces the pairing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: i64,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub logo_content_type: Option<String>,
    pub created_time: Option<i64>,
    pub updated_time: Option<i64>,
    #[serde(default)]
    pub last_modified: i64,
}

impl_has_last_modified!(Report);

impl Entity for Report {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Report {
    pub fn from_public(id: i64, report: PublicReport, last_modified: i64) -> Self {
        Self {
            id,
            name: report.name,
            logo: report.logo,
            logo_content_type: report.logo_content_type,
            created_time: report.created_time,
            updated_time: report.updated_time,
            last_modified,
        }
    }

    pub fn publish(self) -> PublicReport {
        PublicReport {
            id: Some(self.id),
            name: self.name,
            logo: self.logo,
            logo_content_type: self.logo_content_type,
            created_time: self.created_time,
            updated_time: self.updated_time,
        }
    }

    /// Maps a wire property to the stored field, rejecting anything that is
    /// not sortable.
    pub fn stored_field(property: &str) -> Option<&'static str> {
        match property {
            "id" => Some("id"),
            "name" => Some("name"),
            "logoContentType" => Some("logo_content_type"),
            "createdTime" => Some("created_time"),
            "updatedTime" => Some("updated_time"),
            _ => None,
        }
    }
}
