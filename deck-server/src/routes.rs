//! API route handlers.
//!
//! Slides move across this surface as whole-document snapshots; partial
//! element writes never reach the store. Template application and static
//! export surface their distinct error conditions (404 for unknown ids,
//! 402 for tier violations, 422 for rejected payloads) so callers can
//! branch on them.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use deck_core::brand::BrandKit;
use deck_core::resolve::{ResolveContext, SlotStyling};
use deck_core::schema::SlideDocument;
use deck_core::slide::SlideId;
use deck_renderer::html::{ExportPage, PageMetadata, StaticRenderer};
use deck_templates::apply::{ApplyRequest, SlotOverride};
use deck_templates::template::{AccessTier, TemplateId};
use deck_templates::TemplateError;

use crate::{metrics, validation, AppState};

fn error_body(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message.into() }))
}

fn parse_slide_id(raw: &str) -> Result<SlideId, Response> {
    SlideId::parse(raw).map_err(|_| {
        (StatusCode::NOT_FOUND, error_body(format!("unknown slide: {raw}"))).into_response()
    })
}

/// List all slides in deck order.
pub async fn list_slides(State(state): State<AppState>) -> Json<Vec<SlideDocument>> {
    let docs = state
        .store
        .list()
        .iter()
        .map(SlideDocument::from)
        .collect();
    Json(docs)
}

/// Get one slide document.
pub async fn get_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SlideDocument>, Response> {
    let slide_id = parse_slide_id(&id)?;
    state.store.get(slide_id).map_or_else(
        || Err((StatusCode::NOT_FOUND, error_body(format!("unknown slide: {id}"))).into_response()),
        |slide| Ok(Json(SlideDocument::from(&slide))),
    )
}

/// Write one slide as a whole-document snapshot. The payload is validated
/// before anything mutates; the stored document (with server-assigned
/// defaults materialized) is returned.
pub async fn put_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut doc): Json<SlideDocument>,
) -> Result<Json<SlideDocument>, Response> {
    // The path wins over any id in the body.
    doc.id = id;

    if let Err(e) = validation::validate_slide_document(&doc) {
        metrics::record_validation_failure("slide_document");
        return Err((StatusCode::UNPROCESSABLE_ENTITY, error_body(e.to_string())).into_response());
    }

    let slide = doc
        .into_slide()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, error_body(e)).into_response())?;

    state.store.insert(slide.clone());
    metrics::record_slide_write();
    metrics::set_slides_stored(state.store.len());

    Ok(Json(SlideDocument::from(&slide)))
}

/// Delete one slide.
pub async fn delete_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    let slide_id = parse_slide_id(&id)?;
    state.store.remove(slide_id).map_err(|_| {
        (StatusCode::NOT_FOUND, error_body(format!("unknown slide: {id}"))).into_response()
    })?;
    metrics::set_slides_stored(state.store.len());
    Ok(StatusCode::NO_CONTENT)
}

/// Template listing entry.
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    /// Template id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Generation category.
    pub category: String,
    /// Required subscription tier.
    pub access_tier: AccessTier,
    /// Whether the template carries explicit element seeds.
    pub visual: bool,
}

/// List the available templates.
pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<TemplateSummary>> {
    let summaries = state
        .engine
        .registry()
        .list()
        .into_iter()
        .map(|template| TemplateSummary {
            id: template.id.to_string(),
            name: template.name.clone(),
            category: template.category.clone(),
            access_tier: template.access_tier,
            visual: template.is_visual(),
        })
        .collect();
    Json(summaries)
}

/// Template application request payload.
#[derive(Debug, Deserialize)]
pub struct ApplyTemplatePayload {
    /// Template to apply.
    pub template_id: String,
    /// Caller-supplied content, possibly empty.
    #[serde(default)]
    pub content: serde_json::Value,
    /// Business profile forwarded to content generation.
    #[serde(default)]
    pub business_profile: serde_json::Value,
    /// Per-slot style/content overrides.
    #[serde(default)]
    pub overrides: HashMap<String, OverridePayload>,
    /// Caller's subscription tier.
    #[serde(default)]
    pub tier: AccessTier,
    /// When re-templating, the slide whose identity is preserved.
    #[serde(default)]
    pub existing_slide_id: Option<String>,
}

/// Wire form of a slot override.
#[derive(Debug, Default, Deserialize)]
pub struct OverridePayload {
    /// Style values to force.
    #[serde(default)]
    pub style: SlotStyling,
    /// Content value to force.
    #[serde(default)]
    pub content: Option<String>,
}

/// Template application response payload.
#[derive(Debug, Serialize)]
pub struct ApplyTemplateResponse {
    /// The resulting slide document.
    pub slide: SlideDocument,
    /// Per-slot styling for the resolve context.
    pub styling: HashMap<String, SlotStyling>,
}

/// Apply a template, store the resulting slide, and return it.
pub async fn apply_template(
    State(state): State<AppState>,
    Json(payload): Json<ApplyTemplatePayload>,
) -> Result<Json<ApplyTemplateResponse>, Response> {
    let template_id = TemplateId::parse(&payload.template_id).map_err(|_| {
        metrics::record_template_application("not_found");
        (
            StatusCode::NOT_FOUND,
            error_body(format!("unknown template: {}", payload.template_id)),
        )
            .into_response()
    })?;

    let existing = match &payload.existing_slide_id {
        Some(raw) => {
            let slide_id = parse_slide_id(raw)?;
            let slide = state.store.get(slide_id).ok_or_else(|| {
                (StatusCode::NOT_FOUND, error_body(format!("unknown slide: {raw}")))
                    .into_response()
            })?;
            Some(slide)
        }
        None => None,
    };

    let overrides = payload
        .overrides
        .into_iter()
        .map(|(field, o)| {
            (
                field,
                SlotOverride {
                    style: o.style,
                    content: o.content,
                },
            )
        })
        .collect();

    let request = ApplyRequest {
        template_id,
        content: payload.content,
        business_profile: payload.business_profile,
        overrides,
        tier: payload.tier,
        existing: existing.as_ref(),
    };

    match state.engine.apply(request).await {
        Ok(applied) => {
            metrics::record_template_application("ok");
            state.store.insert(applied.slide.clone());
            metrics::set_slides_stored(state.store.len());
            Ok(Json(ApplyTemplateResponse {
                slide: SlideDocument::from(&applied.slide),
                styling: applied.styling,
            }))
        }
        Err(TemplateError::NotFound(id)) => {
            metrics::record_template_application("not_found");
            Err((StatusCode::NOT_FOUND, error_body(format!("unknown template: {id}")))
                .into_response())
        }
        Err(TemplateError::UpgradeRequired { required }) => {
            metrics::record_template_application("upgrade_required");
            Err((
                StatusCode::PAYMENT_REQUIRED,
                Json(serde_json::json!({
                    "error": "upgrade required",
                    "required_tier": required,
                })),
            )
                .into_response())
        }
        Err(e) => {
            metrics::record_template_application("error");
            Err((StatusCode::UNPROCESSABLE_ENTITY, error_body(e.to_string())).into_response())
        }
    }
}

/// Static export request payload.
#[derive(Debug, Deserialize)]
pub struct ExportPayload {
    /// Slides to export, in page order.
    pub slide_ids: Vec<String>,
    /// Project whose brand kit should be fetched, when a brand service is
    /// configured and no kit is inlined.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Inline brand kit snapshot.
    #[serde(default)]
    pub brand: Option<BrandKit>,
    /// Per-slot styling for templated slides.
    #[serde(default)]
    pub styling: HashMap<String, SlotStyling>,
    /// Business-data record for data elements.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Static export response payload.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Self-contained HTML fragment.
    pub html: String,
    /// Per-page metadata for the export pipeline.
    pub pages: Vec<PageMetadata>,
}

/// Render slides to the static HTML fragment consumed by the external
/// document-export pipeline. Rendering runs on the blocking pool so it
/// never stalls interactive traffic.
pub async fn export(
    State(state): State<AppState>,
    Json(payload): Json<ExportPayload>,
) -> Result<Json<ExportResponse>, Response> {
    if payload.slide_ids.is_empty() || payload.slide_ids.len() > validation::MAX_SLIDES_PER_EXPORT {
        metrics::record_validation_failure("export_slides");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            error_body("export requires between 1 and 100 slides"),
        )
            .into_response());
    }

    let mut slides = Vec::with_capacity(payload.slide_ids.len());
    for raw in &payload.slide_ids {
        let slide_id = parse_slide_id(raw)?;
        let slide = state.store.get(slide_id).ok_or_else(|| {
            (StatusCode::NOT_FOUND, error_body(format!("unknown slide: {raw}"))).into_response()
        })?;
        slides.push(slide);
    }

    let brand = match (payload.brand, &payload.project_id, &state.brand) {
        (Some(kit), _, _) => Some(kit),
        (None, Some(project_id), Some(client)) => client.fetch(project_id).await,
        _ => None,
    };
    let styling = payload.styling;
    let data = payload.data;

    let rendered = tokio::task::spawn_blocking(move || {
        let ctx = ResolveContext {
            styling: Some(&styling),
            brand: brand.as_ref(),
            data: data.as_ref(),
        };
        let pages: Vec<ExportPage<'_>> = slides
            .iter()
            .map(|slide| ExportPage { slide, ctx })
            .collect();
        StaticRenderer::new().render_deck(&pages)
    })
    .await;

    match rendered {
        Ok(Ok(output)) => {
            metrics::record_export(true);
            Ok(Json(ExportResponse {
                html: output.html,
                pages: output.pages,
            }))
        }
        Ok(Err(e)) => {
            metrics::record_export(false);
            Err((StatusCode::UNPROCESSABLE_ENTITY, error_body(e.to_string())).into_response())
        }
        Err(e) => {
            metrics::record_export(false);
            tracing::error!(error = %e, "export task panicked");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("export failed"),
            )
                .into_response())
        }
    }
}
