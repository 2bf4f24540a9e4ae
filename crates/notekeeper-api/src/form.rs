use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;

use crate::error::AppError;

/// Fields of a note creation request.
///
/// Accepted as `multipart/form-data`, `application/json`, or URL-encoded
/// form. Both fields are optional at this layer so the handler can report
/// which one is missing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteForm {
    pub note_name: Option<String>,
    pub note: Option<String>,
}

impl<S> FromRequest<S> for CreateNoteForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            return read_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(form) = Json::<Self>::from_request(request, state)
                .await
                .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            return Ok(form);
        }

        let Form(form) = Form::<Self>::from_request(request, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(form)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<CreateNoteForm, AppError> {
    let mut form = CreateNoteForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::bad_request(error.body_text()))?
    {
        let slot = match field.name() {
            Some("note_name") => &mut form.note_name,
            Some("note") => &mut form.note,
            _ => continue,
        };
        *slot = Some(
            field
                .text()
                .await
                .map_err(|error| AppError::bad_request(error.body_text()))?,
        );
    }

    Ok(form)
}
