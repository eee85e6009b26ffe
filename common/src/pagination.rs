use anyhow::anyhow;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::error::{self, AddCode};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// `?page=0&size=20&sort=name,desc`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pageable {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    pub sort: Option<String>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl Pageable {
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.limit())
    }

    /// Sort document over stored field names; `resolve` maps a wire property
    /// to its stored field or rejects it.
    pub fn sort_document(
        &self,
        resolve: impl Fn(&str) -> Option<&'static str>,
    ) -> error::Result<Option<Document>> {
        let Some(sort) = &self.sort else {
            return Ok(None);
        };

        let mut parts = sort.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default();
        let Some(field) = resolve(property) else {
            return Err(anyhow!("Unknown sort property: {}", property).code(400));
        };
        let direction = match parts.next().map(str::to_lowercase).as_deref() {
            None | Some("asc") => 1,
            Some("desc") => -1,
            Some(other) => {
                return Err(anyhow!("Unknown sort direction: {}", other).code(400));
            }
        };

        Ok(Some(doc! {field: direction}))
    }
}

pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            1
        } else {
            (self.total_elements + self.size - 1) / self.size
        }
    }
}

/// `X-Total-Count` and `Link` headers for a page served from `base_url`.
pub fn generate_pagination_headers<T>(
    base_url: &str,
    sort: Option<&str>,
    page: &Page<T>,
) -> Vec<(String, String)> {
    let prepare_link = |number: u64, rel: &str| {
        let mut url = format!("{}?page={}&size={}", base_url, number, page.size);
        if let Some(sort) = sort {
            url.push_str("&sort=");
            url.push_str(&urlencoding::encode(sort));
        }
        format!("<{}>; rel=\"{}\"", url, rel)
    };

    let total_pages = page.total_pages();
    let mut links = Vec::new();
    if page
        .number
        .checked_add(1)
        .map_or(false, |next| next < total_pages)
    {
        links.push(prepare_link(page.number + 1, "next"));
    }
    if page.number > 0 {
        links.push(prepare_link(page.number - 1, "prev"));
    }
    let last_page = total_pages.saturating_sub(1);
    links.push(prepare_link(last_page, "last"));
    links.push(prepare_link(0, "first"));

    vec![
        ("X-Total-Count".to_string(), page.total_elements.to_string()),
        ("Link".to_string(), links.join(",")),
    ]
}
