/*
 * Responsibility
 * - 検索・一覧の候補となるプロフィールの供給元 (ProfileSource)
 * - 検索エンジンはデータを持たない。state 経由で注入された source から候補を受け取る
 */
pub mod demo;

use chrono::{DateTime, Utc};

use crate::services::search::Candidate;

pub use demo::DemoProfileSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub city: String,
    pub primary_photo_url: String,
    pub bio: String,
    pub occupation: String,
    pub interests: Vec<String>,
    pub is_verified: bool,
    pub is_online: bool,
    pub last_active_at: DateTime<Utc>,
}

impl Candidate for ProfileSummary {
    fn age(&self) -> i64 {
        self.age
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetail {
    pub summary: ProfileSummary,
    pub email: String,
    pub gender: String,
    pub preferences: String,
    pub sexual_orientation: String,
    pub state: String,
    pub country: String,
    pub photo_urls: Vec<String>,
    pub company: String,
    pub education: String,
    pub school: String,
    pub height_cm: u32,
    pub religion: String,
    pub ethnicity: String,
    pub smoking_status: String,
    pub drinking_status: String,
    pub wants_children: bool,
    pub has_children: bool,
    pub relationship_type: String,
    pub languages: Vec<String>,
    pub hobby_list: String,
    pub instagram_handle: String,
    pub spotify_top_artists: String,
    pub is_phone_verified: bool,
    pub is_email_verified: bool,
    pub is_photo_verified: bool,
    pub is_premium: bool,
    pub subscription_type: String,
    pub created_at: DateTime<Utc>,
}

/// Supplies profile candidates. Implementations must return the same
/// sequence for the same arguments.
pub trait ProfileSource: Send + Sync + std::fmt::Debug {
    /// The first `count` profiles, ids starting at 1.
    fn summaries(&self, count: usize) -> Vec<ProfileSummary>;

    fn detail(&self, id: u64) -> Option<ProfileDetail>;
}
