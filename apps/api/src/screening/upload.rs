use axum::extract::Multipart;

use crate::errors::AppError;
use crate::models::resume::ResumeUpload;

/// Form field carrying the PDF files. May repeat.
pub const RESUMES_FIELD: &str = "resumes";
/// Form field carrying the comma-separated skill list.
pub const SKILLS_FIELD: &str = "skills";

/// Parsed fields of the screening form.
#[derive(Debug)]
pub struct ScreeningForm {
    pub uploads: Vec<ResumeUpload>,
    /// `None` when the field was not sent at all.
    pub skills: Option<String>,
}

/// Reads the multipart upload into structured form fields.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut uploads = Vec::new();
    let mut skills: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            RESUMES_FIELD => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("resume-{}.pdf", uploads.len() + 1));
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {filename}: {e}")))?;

                // Browsers send one empty part when no file was chosen.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                uploads.push(ResumeUpload::new(filename, data));
            }
            SKILLS_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read skills: {e}")))?;
                skills = Some(value);
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(ScreeningForm { uploads, skills })
}
