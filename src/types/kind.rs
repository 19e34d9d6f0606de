use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three listing collections the board exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Job,
    Scholarship,
    Event,
}

/// One filterable field of a listing kind and the values it may take.
#[derive(Debug, PartialEq, Eq)]
pub struct FacetSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

/// Capability set shared by the generic card, modal, form and view code.
#[derive(Debug)]
pub struct KindSpec {
    pub kind: ListingKind,
    /// Singular, lowercase name used in messages ("scholarship").
    pub display_name: &'static str,
    /// Collection endpoint, without the `/api` prefix.
    pub resource: &'static str,
    /// Key of the record array inside a list response.
    pub collection_key: &'static str,
    /// Local storage key of the bookmark set.
    pub bookmark_key: &'static str,
    /// Saved-relation endpoint, without the `/api` prefix.
    pub saved_resource: &'static str,
    /// Name of the listing id field in saved-relation bodies.
    pub saved_id_field: &'static str,
    /// Record field holding the owning organisation's name.
    pub organization_field: &'static str,
    /// Facet shown as the card's primary badge.
    pub badge_facet: &'static str,
    /// Facet that selects the default banner image, if any.
    pub image_facet: Option<&'static str>,
    pub facets: &'static [FacetSpec],
}

const LOCATIONS: &[&str] = &[
    "Global",
    "United States",
    "United Kingdom",
    "Canada",
    "Europe",
    "Asia",
    "Africa",
    "Australia",
];

const JOB_SPEC: KindSpec = KindSpec {
    kind: ListingKind::Job,
    display_name: "job",
    resource: "/jobs",
    collection_key: "jobs",
    bookmark_key: "savedJobIds",
    saved_resource: "/saved-jobs",
    saved_id_field: "jobId",
    organization_field: "company",
    badge_facet: "jobType",
    image_facet: Some("category"),
    facets: &[
        FacetSpec {
            key: "type",
            label: "Opportunity Type",
            options: &["Job", "Internship"],
        },
        FacetSpec {
            key: "jobType",
            label: "Employment Type",
            options: &["Full-time", "Part-time", "Contract", "Remote"],
        },
        FacetSpec {
            key: "location",
            label: "Location",
            options: LOCATIONS,
        },
    ],
};

const SCHOLARSHIP_SPEC: KindSpec = KindSpec {
    kind: ListingKind::Scholarship,
    display_name: "scholarship",
    resource: "/scholarships",
    collection_key: "scholarships",
    bookmark_key: "savedScholarshipIds",
    saved_resource: "/saved-scholarships",
    saved_id_field: "scholarshipId",
    organization_field: "organization",
    badge_facet: "funding_type",
    image_facet: Some("field_of_study"),
    facets: &[
        FacetSpec {
            key: "degree_level",
            label: "Degree Level",
            options: &["Undergraduate", "Masters", "PhD", "Postdoctoral", "All Levels"],
        },
        FacetSpec {
            key: "funding_type",
            label: "Funding Type",
            options: &["Full", "Partial", "Tuition Only", "Living Expenses", "Research Grant"],
        },
        FacetSpec {
            key: "location",
            label: "Location",
            options: LOCATIONS,
        },
    ],
};

const EVENT_SPEC: KindSpec = KindSpec {
    kind: ListingKind::Event,
    display_name: "event",
    resource: "/events",
    collection_key: "events",
    bookmark_key: "savedEventIds",
    saved_resource: "/saved-events",
    saved_id_field: "eventId",
    organization_field: "organizer",
    badge_facet: "event_type",
    image_facet: Some("event_type"),
    facets: &[
        FacetSpec {
            key: "event_type",
            label: "Event Type",
            options: &[
                "Conference",
                "Workshop",
                "Seminar",
                "Training",
                "Bootcamp",
                "Hackathon",
                "Networking",
                "Webinar",
                "Competition",
                "Job Fair",
            ],
        },
        FacetSpec {
            key: "format",
            label: "Format",
            options: &["In-person", "Virtual", "Hybrid"],
        },
        FacetSpec {
            key: "location",
            label: "Location",
            options: LOCATIONS,
        },
    ],
};

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [ListingKind::Job, ListingKind::Scholarship, ListingKind::Event];

    pub fn spec(self) -> &'static KindSpec {
        match self {
            ListingKind::Job => &JOB_SPEC,
            ListingKind::Scholarship => &SCHOLARSHIP_SPEC,
            ListingKind::Event => &EVENT_SPEC,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::Job => "job",
            ListingKind::Scholarship => "scholarship",
            ListingKind::Event => "event",
        }
    }
}

impl KindSpec {
    pub fn facet(&self, key: &str) -> Option<&FacetSpec> {
        self.facets.iter().find(|f| f.key == key)
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    /// Accepts the singular name or the collection name ("event" / "events").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "job" | "jobs" => Ok(ListingKind::Job),
            "scholarship" | "scholarships" => Ok(ListingKind::Scholarship),
            "event" | "events" => Ok(ListingKind::Event),
            other => Err(format!("unknown listing kind: {}", other)),
        }
    }
}
