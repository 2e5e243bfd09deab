use crate::{
    constants::{CHAT_PATH, QUESTION_PARAM},
    errors::{ConfabError, ConfabResult},
    logging::{log_api_call, summarize_request, ApiCallLog},
};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;

/// Sends one question to the chat backend and returns its reply.
///
/// Issues a single `GET {base_url}/chat?user_question=<text>` (reqwest handles
/// the URL encoding). A non-2xx status, an unreachable server, or a body
/// without a string `response` field are all errors; the caller decides how to
/// surface them. There is no timeout and no retry.
pub async fn fetch_reply(base_url: &str, question: &str) -> ConfabResult<String> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH);
    let started = Instant::now();

    let client = Client::new();
    let response = client
        .get(&endpoint)
        .query(&[(QUESTION_PARAM, question)])
        .send()
        .await
        .map_err(|e| ConfabError::api_error(format!("Request failed: {}", e)))?;

    let status = response.status();
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.clone(),
        request_summary: summarize_request(question),
        response_status: status.as_u16(),
        response_time_ms: started.elapsed().as_millis(),
    });

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ConfabError::api_error(format!(
            "Server returned error: {} - {}",
            status, error_text
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ConfabError::api_error(format!("Failed to parse response body: {}", e)))?;

    let reply = body["response"]
        .as_str()
        .ok_or_else(|| ConfabError::api_error("Response missing expected 'response' field"))?
        .to_string();

    Ok(reply)
}
