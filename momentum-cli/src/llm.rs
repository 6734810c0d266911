use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use momentum_core::{CoachPersona, ReportPayload};

use crate::config::LlmSection;

/// One semantic report request: persona preamble + payload-bearing user turn.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub model: String,
    pub temperature: f32,
    pub system: String,
    pub user: String,
}

/// Build the request from the persona and the assembled payload.
pub fn build_request(
    llm: &LlmSection,
    persona: CoachPersona,
    payload: &ReportPayload,
) -> Result<ReportRequest> {
    let json = serde_json::to_string_pretty(payload).context("serialize report payload")?;

    let user = format!(
        "다음은 사용자의 오늘 데이터다. 이 데이터를 기반으로 코치 리포트를 작성하라.\n\
\n\
[오늘 데이터(JSON)]\n\
{json}\n\
\n\
[출력 규칙]\n\
- 반드시 아래 섹션 제목을 그대로 사용해 Markdown으로 출력:\n\
  1) 컨디션 등급(S~D)\n\
  2) 습관 분석\n\
  3) 날씨 코멘트\n\
  4) 내일 미션\n\
  5) 오늘의 한마디\n\
- 등급은 S/A/B/C/D 중 하나만.\n\
- 내용은 구체적으로: 습관별로 좋았던 점/빈틈/개선 1가지를 제시.\n\
- '내일 미션'은 3개, 체크리스트 형태.\n\
- 너무 길지 않게(대략 12~20줄)."
    );

    Ok(ReportRequest {
        model: llm.model.clone(),
        temperature: llm.temperature,
        system: persona.system_prompt().to_string(),
        user,
    })
}

/// One way of asking the completion service for the same semantic request.
/// Implementations differ only in endpoint and body/response shape.
pub trait ReportCall {
    fn name(&self) -> &'static str;

    async fn call(
        &self,
        client: &reqwest::Client,
        base_url: &str,
        api_key: &str,
        req: &ReportRequest,
    ) -> Result<String>;
}

/// Responses API shape: POST /v1/responses with a role/content input list.
pub struct ResponsesApi;

impl ReportCall for ResponsesApi {
    fn name(&self) -> &'static str {
        "responses"
    }

    async fn call(
        &self,
        client: &reqwest::Client,
        base_url: &str,
        api_key: &str,
        req: &ReportRequest,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct Turn<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            input: Vec<Turn<'a>>,
        }

        #[derive(Deserialize)]
        struct Resp {
            output_text: Option<String>,
            #[serde(default)]
            output: Vec<OutputItem>,
        }

        #[derive(Deserialize)]
        struct OutputItem {
            #[serde(default)]
            content: Vec<ContentBlock>,
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            text: Option<String>,
        }

        let body = Req {
            model: &req.model,
            input: vec![
                Turn { role: "system", content: &req.system },
                Turn { role: "user", content: &req.user },
            ],
        };

        let resp = client
            .post(format!("{base_url}/v1/responses"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("responses request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("responses error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse responses body")?;

        // Prefer the flat text; some service versions only give the
        // output[*].content[*].text form.
        if let Some(t) = out.output_text {
            if !t.trim().is_empty() {
                return Ok(t.trim().to_string());
            }
        }
        let chunks: Vec<String> = out
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .filter_map(|c| c.text)
            .collect();
        if chunks.is_empty() {
            bail!("responses body had no text output");
        }
        Ok(chunks.join("\n").trim().to_string())
    }
}

/// Chat Completions shape: POST /v1/chat/completions with a message list.
pub struct ChatCompletions;

impl ReportCall for ChatCompletions {
    fn name(&self) -> &'static str {
        "chat_completions"
    }

    async fn call(
        &self,
        client: &reqwest::Client,
        base_url: &str,
        api_key: &str,
        req: &ReportRequest,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let body = Req {
            model: &req.model,
            messages: vec![
                Msg { role: "system", content: &req.system },
                Msg { role: "user", content: &req.user },
            ],
            temperature: req.temperature,
        };

        let resp = client
            .post(format!("{base_url}/v1/chat/completions"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("chat completions request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("chat completions error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse chat completions body")?;
        let content = out
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            bail!("chat completions body had no content");
        }
        Ok(content.trim().to_string())
    }
}

/// Run the fallback chain: Responses API first, Chat Completions second.
///
/// Returns `None` on missing credential or total failure; report
/// generation never raises past this boundary.
pub async fn generate_report(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    req: &ReportRequest,
) -> Option<String> {
    let key = match api_key {
        Some(k) if !k.is_empty() => k,
        _ => return None,
    };

    match ResponsesApi.call(client, base_url, key, req).await {
        Ok(text) => return Some(text),
        Err(err) => {
            tracing::warn!(shape = ResponsesApi.name(), %err, "report call failed, falling back");
        }
    }

    match ChatCompletions.call(client, base_url, key, req).await {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(shape = ChatCompletions.name(), %err, "report call failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_core::{HabitRecord, HabitStates};

    #[test]
    fn request_embeds_payload_and_rules() {
        let record = HabitRecord::new("2026-08-06".parse().unwrap())
            .with_habits(HabitStates::from_partial([("wake", true)]))
            .with_persona(CoachPersona::Sparta);
        let payload = ReportPayload::assemble(&record, None, None);

        let req = build_request(&crate::config::Config::default().llm, record.persona, &payload)
            .unwrap();

        assert_eq!(req.model, "gpt-5-mini");
        assert!(req.system.contains("스파르타 코치"));
        assert!(req.user.contains("기상 미션"));
        assert!(req.user.contains("컨디션 등급(S~D)"));
        assert!(req.user.contains("'내일 미션'은 3개"));
    }

    #[tokio::test]
    async fn missing_key_yields_none_without_network() {
        let client = reqwest::Client::new();
        let record = HabitRecord::new("2026-08-06".parse().unwrap());
        let payload = ReportPayload::assemble(&record, None, None);
        let req = build_request(&crate::config::Config::default().llm, record.persona, &payload)
            .unwrap();

        assert!(generate_report(&client, "https://api.openai.com", None, &req).await.is_none());
        assert!(generate_report(&client, "https://api.openai.com", Some(""), &req).await.is_none());
    }
}
