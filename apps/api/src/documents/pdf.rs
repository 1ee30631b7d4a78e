use crate::documents::ExtractError;

/// Extracts text from a PDF, concatenating per-page text in page order.
///
/// `pdf-extract` walks pages in document order, so no reordering is needed
/// here. Image-only documents come back (near-)empty and are rejected by the
/// caller's length threshold rather than by this function.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::ExtractionFailed(format!("could not read PDF: {e}")))
}
