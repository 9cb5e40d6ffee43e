//! Résumé storage: PDF uploads in the résumé bucket, one prefix per user.

pub mod handlers;
pub mod text;

use crate::errors::AppError;

/// Upload size cap, enforced on the request body.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// An upload as received, before anything is stored.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: bytes::Bytes,
}

/// Accepts only PDFs: declared type, file extension and magic bytes must all agree.
pub fn check_pdf(upload: &ResumeUpload) -> Result<(), AppError> {
    let declared_pdf = upload
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
    let named_pdf = upload.file_name.to_ascii_lowercase().ends_with(".pdf");

    if !declared_pdf || !named_pdf {
        return Err(AppError::Validation("Please upload a PDF file".into()));
    }
    if upload.data.is_empty() {
        return Err(AppError::Validation("The uploaded file is empty".into()));
    }
    if !upload.data.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "The uploaded file is not a valid PDF".into(),
        ));
    }
    Ok(())
}
