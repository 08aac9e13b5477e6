/*
 * Responsibility
 * - Profiles の request/response DTO
 * - 内部 ID は公開 ID (sqids) に変換してから出す
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::id_codec::{IdCodec, IdCodecError};
use crate::services::profiles::{ProfileDetail, ProfileSummary};

pub const MAX_PROFILE_COUNT: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct ListProfilesQuery {
    pub count: Option<i64>,
}

impl ListProfilesQuery {
    /// Default 10; negative counts mean none, large ones are capped.
    pub fn resolved_count(&self) -> usize {
        self.count.unwrap_or(10).clamp(0, MAX_PROFILE_COUNT) as usize
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub id: String,
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

impl ProfileSummaryResponse {
    pub fn from_summary(
        codec: &IdCodec,
        p: ProfileSummary,
    ) -> Result<Self, IdCodecError> {
        Ok(Self {
            id: codec.encode(p.id)?,
            name: p.name,
            age: p.age,
            city: p.city,
            primary_photo_url: p.primary_photo_url,
            bio: p.bio,
            occupation: p.occupation,
            interests: p.interests,
            is_verified: p.is_verified,
            is_online: p.is_online,
            last_active_at: p.last_active_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetailResponse {
    #[serde(flatten)]
    pub summary: ProfileSummaryResponse,
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
    pub height: u32,
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

impl ProfileDetailResponse {
    pub fn from_detail(
        codec: &IdCodec,
        d: ProfileDetail,
    ) -> Result<Self, IdCodecError> {
        Ok(Self {
            summary: ProfileSummaryResponse::from_summary(codec, d.summary)?,
            email: d.email,
            gender: d.gender,
            preferences: d.preferences,
            sexual_orientation: d.sexual_orientation,
            state: d.state,
            country: d.country,
            photo_urls: d.photo_urls,
            company: d.company,
            education: d.education,
            school: d.school,
            height: d.height_cm,
            religion: d.religion,
            ethnicity: d.ethnicity,
            smoking_status: d.smoking_status,
            drinking_status: d.drinking_status,
            wants_children: d.wants_children,
            has_children: d.has_children,
            relationship_type: d.relationship_type,
            languages: d.languages,
            hobby_list: d.hobby_list,
            instagram_handle: d.instagram_handle,
            spotify_top_artists: d.spotify_top_artists,
            is_phone_verified: d.is_phone_verified,
            is_email_verified: d.is_email_verified,
            is_photo_verified: d.is_photo_verified,
            is_premium: d.is_premium,
            subscription_type: d.subscription_type,
            created_at: d.created_at,
        })
    }
}
