/*
 * Responsibility
 * - /profiles 系 handler (一覧 / 詳細 / 検索)
 * - 候補は state.profiles (ProfileSource) から受け取り、検索は resolve → paginate に委譲する
 * - Path の :profile_id は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::v1::{
        dto::{
            profiles::{ListProfilesQuery, ProfileDetailResponse, ProfileSummaryResponse},
            search::SearchResponse,
        },
        extractors::{AuthCtxExtractor, PublicProfileId},
    },
    error::AppError,
    services::search::{SearchRequest, paginate},
    state::AppState,
};

pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<Vec<ProfileSummaryResponse>>, AppError> {
    let profiles = state.profiles.summaries(query.resolved_count());

    let mut res = Vec::with_capacity(profiles.len());
    for p in profiles {
        res.push(ProfileSummaryResponse::from_summary(&state.id_codec, p)?);
    }

    tracing::info!(count = res.len(), "listed demo profiles");
    Ok(Json(res))
}

pub async fn get_profile(
    State(state): State<AppState>,
    profile_id: PublicProfileId,
) -> Result<Json<ProfileDetailResponse>, AppError> {
    let detail = state
        .profiles
        .detail(profile_id.id)
        .ok_or(AppError::not_found("profile"))?;

    Ok(Json(ProfileDetailResponse::from_detail(
        &state.id_codec,
        detail,
    )?))
}

pub async fn search_profiles(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse<ProfileSummaryResponse>>, AppError> {
    let criteria = state.search.resolve(&req);
    let page = paginate(state.profiles.summaries(state.search_pool_size), &criteria);

    let page = page.try_map(|p| ProfileSummaryResponse::from_summary(&state.id_codec, p))?;

    tracing::info!(
        subject = %ctx.subject(),
        returned = page.items.len(),
        total = page.total_count,
        page = page.page,
        "profile search"
    );

    Ok(Json(SearchResponse::from(page)))
}
