use serde::{Deserialize, Serialize};

use super::listing::{Job, Pagination};

/// A company profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "jobCount", default)]
    pub job_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompaniesPage {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// An account on the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "isPro", default)]
    pub is_pro: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Payload of `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// A label with a count, used by the stats breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsOverview {
    #[serde(rename = "totalJobs", default)]
    pub total_jobs: u64,
    #[serde(rename = "activeJobs", default)]
    pub active_jobs: u64,
    #[serde(rename = "totalCompanies", default)]
    pub total_companies: u64,
    #[serde(rename = "totalUsers", default)]
    pub total_users: u64,
    #[serde(rename = "featuredJobs", default)]
    pub featured_jobs: u64,
    #[serde(rename = "recentJobs", default)]
    pub recent_jobs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub count: u64,
}

/// Public board statistics from `/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub overview: StatsOverview,
    #[serde(default)]
    pub categories: Vec<NamedCount>,
    #[serde(default)]
    pub locations: Vec<NamedCount>,
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub inactive: u64,
    #[serde(default)]
    pub featured: u64,
    #[serde(default)]
    pub today: u64,
    #[serde(rename = "thisWeek", default)]
    pub this_week: u64,
    #[serde(rename = "thisMonth", default)]
    pub this_month: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyCounts {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub regular: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub jobs: JobCounts,
    #[serde(default)]
    pub companies: CompanyCounts,
    #[serde(default)]
    pub users: UserCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Admin dashboard statistics from `/stats/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub overview: DashboardOverview,
    #[serde(rename = "recentActivity", default)]
    pub recent_activity: RecentActivity,
}
