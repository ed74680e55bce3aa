//! Axum route handlers for the RFP API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{render, write_docx, RichDocument};
use crate::rfp::assembler::{
    assemble_markdown, content_disposition, download_filename, ExportFormat,
};
use crate::rfp::extraction::extract_example_text;
use crate::rfp::models::{ExportRequest, RfpDraft, RfpInputs};
use crate::state::AppState;

/// Multipart field carrying the optional example RFP.
const EXAMPLE_FIELD: &str = "example_rfp";

/// Reads the form fields and the optional upload out of a multipart body.
async fn read_generate_form(
    mut multipart: Multipart,
) -> Result<(RfpInputs, Option<Bytes>), AppError> {
    let mut inputs = RfpInputs::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "project_name" => inputs.project_name = field.text().await?,
            "scope_text" => inputs.scope_text = field.text().await?,
            "duration" => inputs.duration = field.text().await?,
            "department" => inputs.department = field.text().await?,
            "criteria_text" => inputs.criteria_text = field.text().await?,
            EXAMPLE_FIELD => upload = Some(field.bytes().await?),
            other => warn!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok((inputs, upload))
}

/// POST /api/v1/rfp/generate
///
/// Validates the form, extracts the optional example PDF, then drafts the Scope
/// of Work and the Criteria, in that order. Any failure aborts the whole action.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RfpDraft>, AppError> {
    let (inputs, upload) = read_generate_form(multipart).await?;
    inputs.validate()?;

    let draft_id = Uuid::new_v4();
    info!(
        "Draft {draft_id}: generating RFP sections for '{}'",
        inputs.project_name
    );

    let example_text = match upload {
        Some(bytes) => extract_example_text(bytes).await?,
        None => String::new(),
    };

    let scope_of_work = state
        .composer
        .compose_scope_of_work(&inputs, &example_text)
        .await?;
    let criteria = state
        .composer
        .compose_criteria(&inputs, &example_text)
        .await?;

    let markdown =
        assemble_markdown(&inputs.project_name, &scope_of_work, &criteria).into_string();
    info!("Draft {draft_id}: both sections generated");

    Ok(Json(RfpDraft {
        draft_id,
        generated_at: Utc::now(),
        project_name: inputs.project_name,
        scope_of_work,
        criteria,
        markdown,
    }))
}

/// POST /api/v1/rfp/preview
///
/// Returns the rich document the `.docx` export would contain.
pub async fn handle_preview(
    Json(request): Json<ExportRequest>,
) -> Result<Json<RichDocument>, AppError> {
    request.validate()?;
    let markdown = assemble_markdown(
        &request.project_name,
        &request.scope_of_work,
        &request.criteria,
    );
    Ok(Json(render(&markdown)))
}

fn download(filename: &str, format: ExportFormat, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        body,
    )
        .into_response()
}

/// POST /api/v1/rfp/export/markdown
pub async fn handle_export_markdown(
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    request.validate()?;
    let markdown = assemble_markdown(
        &request.project_name,
        &request.scope_of_work,
        &request.criteria,
    );
    let filename = download_filename(&request.project_name, ExportFormat::Markdown);

    info!("Exporting {filename}");
    Ok(download(
        &filename,
        ExportFormat::Markdown,
        markdown.into_string().into_bytes(),
    ))
}

/// POST /api/v1/rfp/export/docx
pub async fn handle_export_docx(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    request.validate()?;
    let markdown = assemble_markdown(
        &request.project_name,
        &request.scope_of_work,
        &request.criteria,
    );
    let filename = download_filename(&request.project_name, ExportFormat::Docx);

    // Rendering and zip packing are CPU-bound.
    let bytes = tokio::task::spawn_blocking(move || write_docx(&render(&markdown)))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in DOCX export: {e}"))
        })??;

    info!("Exporting {filename} ({} bytes)", bytes.len());
    Ok(download(&filename, ExportFormat::Docx, bytes))
}
