use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::input::{ImageFile, InputMode, InputSelection};

/// Multipart payload for `/api/generate-content`: the `input_type` tag plus
/// exactly one body field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateRequest {
    pub input_type: InputMode,
    pub part: RequestPart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestPart {
    /// `content`: trimmed text or URL.
    Content(String),
    /// `image`: raw file bytes.
    Image(ImageFile),
    /// `guided_answers`: JSON-encoded `{niche, objective, tone}`.
    GuidedAnswers(String),
}

#[derive(Serialize)]
struct GuidedPayload<'a> {
    niche: &'a str,
    objective: &'a str,
    tone: &'a str,
}

/// One wire field as the service will see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File { filename: String, media_type: String, bytes: Bytes },
}

impl GenerateRequest {
    /// Field names and values in the order they are appended to the form.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let body = match &self.part {
            RequestPart::Content(s) => ("content", FieldValue::Text(s.clone())),
            RequestPart::Image(file) => (
                "image",
                FieldValue::File {
                    filename: file.filename.clone(),
                    media_type: file.media_type.clone(),
                    bytes: file.bytes.clone(),
                },
            ),
            RequestPart::GuidedAnswers(json) => ("guided_answers", FieldValue::Text(json.clone())),
        };
        vec![("input_type", FieldValue::Text(self.input_type.as_str().to_string())), body]
    }

    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.fields() {
            form = match value {
                FieldValue::Text(s) => form.text(name, s),
                FieldValue::File { filename, media_type, bytes } => {
                    let part = Part::bytes(bytes.to_vec()).file_name(filename).mime_str(&media_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Build the payload for an input that already passed validation.
///
/// Unset guided selects and a missing image cannot reach here through
/// `Session::submit`; should they, the returned `None` keeps the request off
/// the wire.
pub fn build_request(selection: &InputSelection) -> Option<GenerateRequest> {
    let part = match selection {
        InputSelection::Text(s) | InputSelection::Url(s) => RequestPart::Content(s.trim().to_string()),
        InputSelection::Image(file) => RequestPart::Image(file.clone()?),
        InputSelection::Guided(g) => {
            let payload = GuidedPayload {
                niche: g.niche.trim(),
                objective: g.objective?.as_str(),
                tone: g.tone?.as_str(),
            };
            RequestPart::GuidedAnswers(serde_json::to_string(&payload).ok()?)
        }
    };
    Some(GenerateRequest { input_type: selection.mode(), part })
}
