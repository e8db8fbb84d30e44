use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

const SUPPORTED: [&str; 2] = ["en", "fr"];

/// The languages the client prefers, most preferred first, restricted to the
/// locales the templates ship with.
pub struct UserLanguage {
    preferred: Vec<String>,
}

impl UserLanguage {
    pub fn preferred_languages(&self) -> &[String] {
        &self.preferred
    }

    fn parse_accept_language(header: &str) -> Vec<String> {
        let mut weighted: Vec<(String, f32)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.trim().split(';');
                let tag = parts.next()?.trim().to_lowercase();
                if tag.is_empty() || tag == "*" {
                    return None;
                }

                let quality = parts
                    .find_map(|part| part.trim().strip_prefix("q=").map(str::to_owned))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);

                Some((tag, quality))
            })
            .collect();

        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        weighted
            .into_iter()
            .map(|(tag, _)| tag)
            .filter(|tag| {
                SUPPORTED
                    .iter()
                    .any(|supported| tag == supported || tag.starts_with(&format!("{supported}-")))
            })
            .collect()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let preferred = parts
            .headers
            .get("Accept-Language")
            .and_then(|value| value.to_str().ok())
            .map(Self::parse_accept_language)
            .unwrap_or_default();

        Ok(UserLanguage { preferred })
    }
}
