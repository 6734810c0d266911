use anyhow::Result;

use momentum_core::{DogImage, ReportPayload, WeatherInfo, share_text};
use momentum_fetch::{enrichment_client, fetch_dog, fetch_weather, optional};

use crate::auth::AuthState;
use crate::config::Config;
use crate::llm;
use crate::state::{ReportLog, Session};

/// Everything one generate interaction produced, ready to render.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub weather: Option<WeatherInfo>,
    pub dog: Option<DogImage>,
    pub report: Option<String>,
    pub share: Option<String>,
    /// Credential missing: warn instead of showing a generation error.
    pub missing_openai_key: bool,
}

/// Run one generate interaction.
///
/// Order matters: the ledger commit happens synchronously before any
/// network call, so a failed or slow fetch still leaves history updated.
/// Weather and dog are independent and fetched concurrently; both are
/// best-effort. Report generation runs last over the assembled payload.
pub async fn run_generate(
    session: &mut Session,
    cfg: &Config,
    auth: &AuthState,
) -> Result<GenerateOutcome> {
    session.commit_today();
    tracing::debug!(date = %session.today.date, "committed today's row");

    let (weather, dog) = match enrichment_client() {
        Ok(client) => {
            let owm_key = auth.openweathermap_api_key.clone().unwrap_or_default();
            let (w, d) = tokio::join!(
                fetch_weather(&client, session.today.city(), &owm_key),
                fetch_dog(&client),
            );
            (optional("weather", w), optional("dog", d))
        }
        Err(err) => {
            tracing::warn!(%err, "enrichment client unavailable");
            (None, None)
        }
    };

    let payload = ReportPayload::assemble(&session.today, weather.clone(), dog.clone());

    let missing_openai_key = auth
        .openai_api_key
        .as_deref()
        .is_none_or(|k| k.is_empty());

    let report = if missing_openai_key {
        None
    } else {
        let req = llm::build_request(&cfg.llm, session.today.persona, &payload)?;
        // Report call uses transport defaults; only the enrichment
        // fetches carry the explicit 10s ceiling.
        let client = reqwest::Client::new();
        llm::generate_report(
            &client,
            &cfg.llm.base_url,
            auth.openai_api_key.as_deref(),
            &req,
        )
        .await
    };

    let share = report
        .as_ref()
        .map(|r| share_text(&session.today, weather.as_ref(), dog.as_ref(), r));

    if let Some(s) = &share {
        if let Err(err) = ReportLog::open(session.today.date).and_then(|log| log.append(s)) {
            tracing::warn!(%err, "could not export report");
        }
    }

    Ok(GenerateOutcome {
        weather,
        dog,
        report,
        share,
        missing_openai_key,
    })
}
