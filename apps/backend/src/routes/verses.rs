//! Verse endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use verse_core::repository::require_verse;
use verse_core::{hint, theme_hint, VerseRepository};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/verses
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<VerseListQuery>,
) -> Json<VerseListResponse> {
    let verses = state.session.verses();
    Json(VerseListResponse {
        verses: verses.filter(query.category.as_deref(), query.difficulty),
        categories: verses.categories(),
    })
}

/// GET /api/verses/:id
pub async fn get(
    State(state): State<AppState>,
    Path(verse_id): Path<String>,
) -> Result<Json<VerseRecord>> {
    let verse = require_verse(state.session.verses(), &verse_id)?;
    Ok(Json(verse))
}

/// GET /api/verses/:id/hint
pub async fn get_hint(
    State(state): State<AppState>,
    Path(verse_id): Path<String>,
    Query(query): Query<HintQuery>,
) -> Result<Json<HintResponse>> {
    let verse = require_verse(state.session.verses(), &verse_id)?;
    let revealed = query.revealed.unwrap_or(state.hint_revealed_words);

    Ok(Json(HintResponse {
        hint: hint(&verse.text, revealed),
        theme_hint: theme_hint(&verse),
        verse_id: verse.id,
        revealed,
    }))
}
