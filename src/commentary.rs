use std::time::Duration;

use serde_json::{json, Value};

use crate::types::{EventKind, GameEvent};

/// Optional LLM-backed announcer. The engine never waits on this: callers
/// fire a request per event and fall back to a canned line on any failure,
/// so a missing key or a dead endpoint costs nothing but the canned text.
pub struct CommentaryClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl CommentaryClient {
    /// Builds a client from `COMMENTARY_API_KEY` (required),
    /// `COMMENTARY_API_URL` and `COMMENTARY_MODEL` (optional overrides).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("COMMENTARY_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let api_url = std::env::var("COMMENTARY_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());
        let model =
            std::env::var("COMMENTARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            api_url,
            model,
        })
    }

    pub async fn line_for(&self, event: &GameEvent) -> String {
        match self.request_line(event).await {
            Some(line) => line,
            None => fallback_line(event.kind).to_string(),
        }
    }

    async fn request_line(&self, event: &GameEvent) -> Option<String> {
        let prompt = format!(
            "You are a retro arcade announcer. Event: {:?}. Score: {}. Lives: {}. \
             Reply with one short, punchy, all-caps line (max 10 words).",
            event.kind, event.score, event.lives
        );
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 30,
        });
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .ok()?;
        let value: Value = resp.json().await.ok()?;
        let text = value
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()?
            .trim();
        if text.is_empty() {
            return None;
        }
        Some(text.to_string())
    }
}

/// Canned announcer lines, one per event kind.
pub fn fallback_line(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Start => "LETS GO! DON'T GET CAUGHT!",
        EventKind::PowerUp => "POWER UP! CHASE THEM DOWN!",
        EventKind::GhostEaten => "GHOST DOWN! 200 POINTS!",
        EventKind::Died => "OUCH! WATCH THOSE CORNERS!",
        EventKind::Win => "ALL CLEAR! WHAT A RUN!",
    }
}
