//! Listing records as the backend serves them, plus the capability trait
//! that lets one card/modal/form implementation handle every kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::RequestError;
use super::kind::ListingKind;

/// Shared read access to a listing record, independent of its kind.
pub trait ListingRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ListingKind;

    fn id(&self) -> i64;
    fn title(&self) -> &str;
    fn organization(&self) -> &str;
    fn location(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn banner_image(&self) -> Option<&str>;
    fn logo_image(&self) -> Option<&str>;
    fn image_alt(&self) -> Option<&str>;
    fn link(&self) -> Option<&str>;
    fn deadline(&self) -> Option<&str>;
    fn is_featured(&self) -> bool;
    fn is_active(&self) -> bool;

    /// Value of a facet or descriptive field by its wire name.
    fn facet(&self, key: &str) -> Option<&str>;

    /// Titled long-form sections shown in the detail modal, in display order.
    fn detail_sections(&self) -> Vec<(&'static str, &str)>;
}

/// Returns `Some` only for non-blank strings.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn sections<'a>(candidates: [(&'static str, &'a Option<String>); 6]) -> Vec<(&'static str, &'a str)> {
    candidates
        .into_iter()
        .filter_map(|(title, value)| present(value).map(|v| (title, v)))
        .collect()
}

/// Company summary embedded in a job record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// A job or internship posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(rename = "salaryRange", default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    /// "Job" or "Internship".
    #[serde(rename = "type", default)]
    pub listing_type: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default)]
    pub company_info: Option<CompanyInfo>,
}

impl ListingRecord for Job {
    const KIND: ListingKind = ListingKind::Job;

    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn organization(&self) -> &str {
        &self.company
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn description(&self) -> Option<&str> {
        present(&self.description)
    }
    // Jobs carry no banner; cards fall back to the category image.
    fn banner_image(&self) -> Option<&str> {
        None
    }
    fn logo_image(&self) -> Option<&str> {
        self.company_info.as_ref().and_then(|c| present(&c.logo))
    }
    fn image_alt(&self) -> Option<&str> {
        None
    }
    fn link(&self) -> Option<&str> {
        present(&self.link)
    }
    fn deadline(&self) -> Option<&str> {
        present(&self.deadline)
    }
    fn is_featured(&self) -> bool {
        self.is_featured
    }
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "type" => Some(self.listing_type.as_str()).filter(|s| !s.is_empty()),
            "jobType" => present(&self.job_type),
            "location" => Some(self.location.as_str()).filter(|s| !s.is_empty()),
            "category" => present(&self.category),
            "experience" => present(&self.experience),
            "salaryRange" => present(&self.salary_range),
            _ => None,
        }
    }

    fn detail_sections(&self) -> Vec<(&'static str, &str)> {
        sections([
            ("Description", &self.description),
            ("Requirements", &self.requirements),
            ("Experience", &self.experience),
            ("Salary Range", &self.salary_range),
            ("Published", &self.published),
            ("Deadline", &self.deadline),
        ])
    }
}

/// A scholarship or other study-funding opportunity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub logo_image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub degree_level: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub funding_type: String,
    #[serde(default)]
    pub funding_amount: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
}

impl ListingRecord for Scholarship {
    const KIND: ListingKind = ListingKind::Scholarship;

    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn organization(&self) -> &str {
        &self.organization
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn description(&self) -> Option<&str> {
        present(&self.description)
    }
    fn banner_image(&self) -> Option<&str> {
        present(&self.banner_image)
    }
    fn logo_image(&self) -> Option<&str> {
        present(&self.logo_image)
    }
    fn image_alt(&self) -> Option<&str> {
        present(&self.image_alt)
    }
    fn link(&self) -> Option<&str> {
        present(&self.link)
    }
    fn deadline(&self) -> Option<&str> {
        present(&self.deadline)
    }
    fn is_featured(&self) -> bool {
        self.is_featured
    }
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn facet(&self, key: &str) -> Option<&str> {
        let value = match key {
            "degree_level" => self.degree_level.as_str(),
            "funding_type" => self.funding_type.as_str(),
            "location" => self.location.as_str(),
            "category" => self.category.as_str(),
            "field_of_study" => return present(&self.field_of_study),
            "funding_amount" => return present(&self.funding_amount),
            _ => return None,
        };
        Some(value).filter(|s| !s.is_empty())
    }

    fn detail_sections(&self) -> Vec<(&'static str, &str)> {
        sections([
            ("Description", &self.description),
            ("Requirements", &self.requirements),
            ("Eligibility", &self.eligibility),
            ("Benefits", &self.benefits),
            ("Funding Amount", &self.funding_amount),
            ("Duration", &self.duration),
        ])
    }
}

/// A conference, workshop, competition or similar event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub logo_image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub application_process: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
}

impl ListingRecord for Event {
    const KIND: ListingKind = ListingKind::Event;

    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn organization(&self) -> &str {
        &self.organizer
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn description(&self) -> Option<&str> {
        present(&self.description)
    }
    fn banner_image(&self) -> Option<&str> {
        present(&self.banner_image)
    }
    fn logo_image(&self) -> Option<&str> {
        present(&self.logo_image)
    }
    fn image_alt(&self) -> Option<&str> {
        present(&self.image_alt)
    }
    fn link(&self) -> Option<&str> {
        present(&self.link)
    }
    fn deadline(&self) -> Option<&str> {
        present(&self.deadline)
    }
    fn is_featured(&self) -> bool {
        self.is_featured
    }
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "event_type" => Some(self.event_type.as_str()).filter(|s| !s.is_empty()),
            "location" => Some(self.location.as_str()).filter(|s| !s.is_empty()),
            "category" => Some(self.category.as_str()).filter(|s| !s.is_empty()),
            "format" => present(&self.format),
            "start_date" => present(&self.start_date),
            "end_date" => present(&self.end_date),
            _ => None,
        }
    }

    fn detail_sections(&self) -> Vec<(&'static str, &str)> {
        sections([
            ("Description", &self.description),
            ("Requirements", &self.requirements),
            ("Eligibility", &self.eligibility),
            ("Benefits", &self.benefits),
            ("Application Process", &self.application_process),
            ("Duration", &self.duration),
        ])
    }
}

/// Page metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// One page of listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T: ListingRecord> ListPage<T> {
    /// Decodes an unwrapped list payload such as
    /// `{"scholarships": [...], "pagination": {...}}`.
    ///
    /// A bare array is accepted as an unpaginated page.
    pub fn from_data(data: Value) -> Result<Self, RequestError> {
        let key = T::KIND.spec().collection_key;
        match data {
            Value::Array(_) => Ok(Self {
                items: serde_json::from_value(data)?,
                pagination: None,
            }),
            Value::Object(mut map) => {
                let items = match map.remove(key) {
                    Some(Value::Null) | None => Vec::new(),
                    Some(items) => serde_json::from_value(items)?,
                };
                let pagination = match map.remove("pagination") {
                    Some(Value::Null) | None => None,
                    Some(p) => Some(serde_json::from_value(p)?),
                };
                Ok(Self { items, pagination })
            }
            other => Err(RequestError::Decode(format!(
                "expected {} list, got {}",
                key, other
            ))),
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.map(|p| p.total_pages).unwrap_or(1)
    }
}
