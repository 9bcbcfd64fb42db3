use url::Url;

use crate::error::ValidationError;

use super::InputSelection;

/// Check the active input before anything is sent.
pub fn validate(selection: &InputSelection) -> Result<(), ValidationError> {
    match selection {
        InputSelection::Text(text) => {
            if text.trim().is_empty() {
                return Err(ValidationError::EmptyText);
            }
        }
        InputSelection::Url(url) => {
            if url.trim().is_empty() {
                return Err(ValidationError::EmptyUrl);
            }
            if !is_valid_url(url.trim()) {
                return Err(ValidationError::InvalidUrl);
            }
        }
        InputSelection::Image(None) => return Err(ValidationError::MissingImage),
        InputSelection::Image(Some(file)) => {
            if !file.is_image() {
                return Err(ValidationError::NotAnImage);
            }
        }
        InputSelection::Guided(g) => {
            if g.niche.trim().is_empty() || g.objective.is_none() || g.tone.is_none() {
                return Err(ValidationError::IncompleteGuided);
            }
        }
    }
    Ok(())
}

/// Any absolute URL the parser accepts, whatever the scheme.
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{GuidedAnswers, ImageFile, InputMode, Objective, Tone};

    fn guided(niche: &str, objective: Option<Objective>, tone: Option<Tone>) -> InputSelection {
        InputSelection::Guided(GuidedAnswers { niche: niche.into(), objective, tone })
    }

    #[test]
    fn empty_payloads_fail_with_mode_specific_messages() {
        let cases = [
            (InputMode::Text, "Please enter a text or topic."),
            (InputMode::Url, "Please enter a URL."),
            (InputMode::Image, "Please select an image."),
            (InputMode::Guided, "Please complete all guided form fields."),
        ];
        for (mode, msg) in cases {
            let err = validate(&InputSelection::empty(mode)).unwrap_err();
            assert_eq!(err.to_string(), msg, "mode {mode}");
        }
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert_eq!(validate(&InputSelection::Text("  \n\t".into())), Err(ValidationError::EmptyText));
        assert!(validate(&InputSelection::Text(" vegan recipes ".into())).is_ok());
    }

    #[test]
    fn url_validation_is_permissive_about_scheme() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url(""));
        assert!(is_valid_url("https://example.com/a"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(is_valid_url("ftp://files.example.com/pub"));

        assert_eq!(validate(&InputSelection::Url("not-a-url".into())), Err(ValidationError::InvalidUrl));
        assert!(validate(&InputSelection::Url("  https://instagram.com/example  ".into())).is_ok());
    }

    #[test]
    fn image_must_declare_image_media_type() {
        let png = ImageFile::new(&b"px"[..], "a.png", "image/png");
        assert!(validate(&InputSelection::Image(Some(png))).is_ok());

        let pdf = ImageFile::new(&b"%PDF"[..], "a.pdf", "application/pdf");
        assert_eq!(validate(&InputSelection::Image(Some(pdf))), Err(ValidationError::NotAnImage));
    }

    #[test]
    fn guided_missing_any_field_yields_same_message() {
        let full = guided("fitness", Some(Objective::Educate), Some(Tone::Fun));
        assert!(validate(&full).is_ok());

        let missing = [
            guided("   ", Some(Objective::Educate), Some(Tone::Fun)),
            guided("fitness", None, Some(Tone::Fun)),
            guided("fitness", Some(Objective::Educate), None),
        ];
        for sel in missing {
            assert_eq!(validate(&sel), Err(ValidationError::IncompleteGuided));
        }
    }
}
