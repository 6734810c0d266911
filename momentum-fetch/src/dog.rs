//! Random dog image from Dog CEO, with the breed inferred from the URL.

use momentum_core::DogImage;
use regex::Regex;
use serde::Deserialize;

use crate::error::FetchError;

const DOG_URL: &str = "https://dog.ceo/api/breeds/image/random";

#[derive(Debug, Deserialize)]
struct DogResponse {
    status: Option<String>,
    message: Option<String>,
}

/// Fetch a random dog image. Needs no credential.
pub async fn fetch_dog(client: &reqwest::Client) -> Result<DogImage, FetchError> {
    let resp = client
        .get(DOG_URL)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body: DogResponse = resp
        .json()
        .await
        .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

    if body.status.as_deref() != Some("success") {
        return Err(FetchError::MalformedBody(format!(
            "status={:?}",
            body.status
        )));
    }

    let url = match body.message {
        Some(u) if !u.is_empty() => u,
        _ => return Err(FetchError::MalformedBody("missing image url".to_string())),
    };

    let breed = breed_from_url(&url).unwrap_or_else(|| "Unknown".to_string());
    tracing::debug!(breed, "dog fetch ok");

    Ok(DogImage { url, breed })
}

/// Infer the breed from an image URL like
/// `https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg`:
/// the segment after `breeds/`, hyphens as spaces, title-cased.
pub fn breed_from_url(url: &str) -> Option<String> {
    let re = Regex::new(r"/breeds/([^/]+)/").ok()?;
    let segment = re.captures(url)?.get(1)?.as_str();
    let breed = segment.replace('-', " ");
    let titled: Vec<String> = breed
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if titled.is_empty() {
        return None;
    }
    Some(titled.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breed_parses_hyphenated_segment() {
        let url = "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg";
        assert_eq!(breed_from_url(url).as_deref(), Some("Hound Afghan"));
    }

    #[test]
    fn breed_parses_single_word() {
        let url = "https://images.dog.ceo/breeds/pug/pug_001.jpg";
        assert_eq!(breed_from_url(url).as_deref(), Some("Pug"));
    }

    #[test]
    fn breed_absent_without_breeds_segment() {
        assert_eq!(breed_from_url("https://example.com/cats/tabby.jpg"), None);
        assert_eq!(breed_from_url(""), None);
    }

    #[test]
    fn non_success_status_is_malformed() {
        let body: DogResponse =
            serde_json::from_str(r#"{"status":"error","message":"nope"}"#).unwrap();
        assert_eq!(body.status.as_deref(), Some("error"));
    }
}
