//! Interactive submission form.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::api::dto::ad_input::AdInput;
use crate::domain::entities::ImageUpload;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::expiration::{DEFAULT_TTL_HOURS, to_datetime_local};

/// Values echoed back into the form inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeForm {
    pub title: String,
    pub price: String,
    pub whatsapp: String,
    pub desc: String,
    pub expires: String,
}

impl BridgeForm {
    /// Prefill from submitted or query values; a missing expiration becomes
    /// now + 24h in `datetime-local` format.
    fn from_input(input: &AdInput) -> Self {
        let expires = input.expires.clone().unwrap_or_else(|| {
            to_datetime_local(Utc::now() + Duration::hours(DEFAULT_TTL_HOURS))
        });

        Self {
            title: input.title.clone().unwrap_or_default(),
            price: input.price.clone().unwrap_or_default(),
            whatsapp: input.whatsapp.clone().unwrap_or_default(),
            desc: input.desc.clone().unwrap_or_default(),
            expires,
        }
    }
}

/// Renders `templates/bridge.html`.
#[derive(Template, WebTemplate)]
#[template(path = "bridge.html")]
struct BridgeTemplate {
    form: BridgeForm,
    error: Option<String>,
    max_upload_mb: usize,
}

/// Shows the submission form, prefilled from the query string.
///
/// # Endpoint
///
/// `GET /bridge?title=&price=&whatsapp=&desc=&expires=`
pub async fn bridge_form_handler(
    State(state): State<AppState>,
    query: Result<Query<AdInput>, QueryRejection>,
) -> impl IntoResponse {
    let input = query
        .map(|Query(q)| q.normalized())
        .unwrap_or_default();

    BridgeTemplate {
        form: BridgeForm::from_input(&input),
        error: None,
        max_upload_mb: max_upload_mb(&state),
    }
}

/// Handles the multipart form: uploads the image, inserts the ad, then
/// redirects to the new landing page.
///
/// # Endpoint
///
/// `POST /bridge`
///
/// # Response Codes
///
/// - **303 See Other**: `Location: {SITE_URL}/{slug}`, or `/{slug}` when no
///   site URL is configured
/// - **400 Bad Request**: form re-rendered with the validation message
/// - **500 Internal Server Error**: form re-rendered after an upload, insert
///   or expiration failure
///
/// An image uploaded before a failed insert is not removed.
pub async fn bridge_submit_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let (input, image) = match read_form(multipart).await {
        Ok(parts) => parts,
        Err(e) => return render_error(&state, &AdInput::default(), e),
    };

    match submit(&state, input.clone(), image).await {
        Ok(slug) => {
            Redirect::to(&landing_location(state.site_url(), &slug)).into_response()
        }
        Err(e) => render_error(&state, &input, e),
    }
}

/// Redirect target after a successful submit. Without a configured site URL
/// the path stays relative so the browser keeps its own scheme and host.
fn landing_location(site_url: Option<&str>, slug: &str) -> String {
    let base = site_url.unwrap_or_default().trim_end_matches('/');
    format!("{base}/{slug}")
}

async fn submit(
    state: &AppState,
    input: AdInput,
    image: Option<ImageUpload>,
) -> Result<String, AppError> {
    let request = input.into_request()?;
    let image = image
        .filter(|img| !img.bytes.is_empty())
        .ok_or_else(|| AppError::bad_request("An image is required", json!({ "field": "image" })))?;

    let ad = state
        .ad_service
        .create_interactive(request, image, Utc::now())
        .await?;

    Ok(ad.slug)
}

fn render_error(state: &AppState, input: &AdInput, error: AppError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(code = error.code(), "Submission failed: {}", error);
    } else {
        tracing::debug!("Submission rejected: {}", error);
    }

    let template = BridgeTemplate {
        form: BridgeForm::from_input(&input.clone().normalized()),
        error: Some(error.to_string()),
        max_upload_mb: max_upload_mb(state),
    };

    (status, template).into_response()
}

/// Collects text fields and the `image` file from the form.
async fn read_form(mut multipart: Multipart) -> Result<(AdInput, Option<ImageUpload>), AppError> {
    let mut input = AdInput::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => image = Some(read_image(field).await?),
            "title" => input.title = Some(field.text().await.map_err(form_error)?),
            "price" => input.price = Some(field.text().await.map_err(form_error)?),
            "whatsapp" => input.whatsapp = Some(field.text().await.map_err(form_error)?),
            "desc" => input.desc = Some(field.text().await.map_err(form_error)?),
            "expires" => input.expires = Some(field.text().await.map_err(form_error)?),
            _ => {}
        }
    }

    Ok((input, image))
}

async fn read_image(field: Field<'_>) -> Result<ImageUpload, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(form_error)?;

    Ok(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn form_error(e: MultipartError) -> AppError {
    AppError::bad_request(
        "Could not read the submitted form",
        json!({ "reason": e.body_text() }),
    )
}

fn max_upload_mb(state: &AppState) -> usize {
    state.site.max_upload_bytes.div_ceil(1024 * 1024)
}
