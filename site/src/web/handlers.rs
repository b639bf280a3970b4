//! HTTP handlers
//!
//! Form endpoints for the rendered page, a JSON mirror of the same intents,
//! and the image endpoint that backs image locators.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;
use serde_json::{Value, json};
use shared::ProcessId;
use uuid::Uuid;

use crate::core::{DemoView, Locale};
use crate::error::{SiteError, SiteResult};
use crate::site_impl::Site;
use crate::traits::{AnalyzeOperation, ImageStore};
use crate::types::ImageHandle;
use crate::web::page::{demo_url, render_page};

/// Multipart field carrying the chosen file
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    fn locale(&self, default: Locale) -> Locale {
        Locale::parse_or(self.lang.as_deref(), default)
    }
}

/// Render the full page
pub async fn page<A, S>(State(site): State<Site<A, S>>, Query(query): Query<LangQuery>) -> Markup
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let locale = query.locale(site.default_locale());
    render_page(&site.controller().view().await, locale)
}

/// File chosen from the page's upload form
pub async fn select_image_form<A, S>(
    State(site): State<Site<A, S>>,
    Query(query): Query<LangQuery>,
    mut multipart: Multipart,
) -> SiteResult<Redirect>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let mut handle = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SiteError::invalid_upload(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SiteError::invalid_upload(e.to_string()))?;

        let mut image = ImageHandle::new(bytes, content_type);
        if let Some(file_name) = file_name.filter(|name| !name.is_empty()) {
            image = image.with_file_name(file_name);
        }
        handle = Some(image);
        break;
    }

    site.controller().select_image(handle).await;
    Ok(Redirect::to(&demo_url(query.locale(site.default_locale()))))
}

/// Analyze clicked on the page
pub async fn submit_form<A, S>(State(site): State<Site<A, S>>, Query(query): Query<LangQuery>) -> Redirect
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    // Rejected submits are silent: the button was rendered disabled
    let _ = site.controller().start_submit().await;
    Redirect::to(&demo_url(query.locale(site.default_locale())))
}

/// Current demo view as JSON
pub async fn demo_view<A, S>(State(site): State<Site<A, S>>) -> Json<DemoView>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    Json(site.controller().view().await)
}

/// Select an image from a raw request body; an empty body counts as a cancelled picker
pub async fn select_image_raw<A, S>(State(site): State<Site<A, S>>, headers: HeaderMap, body: Bytes) -> Json<DemoView>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");

    let handle = (!body.is_empty()).then(|| ImageHandle::new(body, content_type));
    Json(site.controller().select_image(handle).await)
}

/// Start an analysis: 202 when started, 409 when the precondition rejects it
pub async fn submit_api<A, S>(State(site): State<Site<A, S>>) -> (StatusCode, Json<DemoView>)
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let status = match site.controller().start_submit().await {
        Some(_) => StatusCode::ACCEPTED,
        None => StatusCode::CONFLICT,
    };
    (status, Json(site.controller().view().await))
}

/// Bytes behind an image locator
pub async fn serve_image<A, S>(State(site): State<Site<A, S>>, Path(id): Path<Uuid>) -> SiteResult<Response>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let image = site.controller().image(id).await.ok_or_else(|| {
        shared::process_debug!(ProcessId::current(), "Image {} requested but not held", id);
        SiteError::ImageNotFound { id: id.to_string() }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.clone()),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        image.bytes,
    )
        .into_response())
}

/// Health check endpoint
pub async fn health<A, S>(State(site): State<Site<A, S>>) -> Json<Value>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    let controller = site.controller();
    let phase = controller.view().await.phase;
    let held_images = controller.store().held_count().await;

    Json(json!({
        "status": "healthy",
        "analyzer": controller.analyzer().name(),
        "phase": phase,
        "held_images": held_images,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
