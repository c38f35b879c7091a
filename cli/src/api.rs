use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;

/// Blocking HTTP wrapper over the three relay endpoints. One request per
/// user action, no retries; failures bubble up to the screen as a single
/// error banner.
pub struct RelayClient {
    http: reqwest::blocking::Client,
    base_url: String,
    debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionData {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct TestData {
    pub message: String,
    #[serde(rename = "openaiResponse")]
    pub openai_response: String,
}

impl RelayClient {
    pub fn new(base_url: &str, debug: bool) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            debug,
        })
    }

    pub fn test(&self) -> Result<TestData> {
        let url = format!("{}/api/test", self.base_url);
        let response = self.http.get(&url).send().context("Failed to reach relay")?;

        let status = response.status();
        let body = response.text().context("Failed to read relay response")?;
        self.echo("GET", &url, None, status, &body);

        if !status.is_success() {
            bail!("relay returned status {}", status);
        }

        serde_json::from_str(&body).context("Invalid test payload from relay")
    }

    pub fn get_question(&self) -> Result<QuestionData> {
        let url = format!("{}/api/question", self.base_url);
        let response = self.http.get(&url).send().context("Failed to reach relay")?;

        let status = response.status();
        let body = response.text().context("Failed to read relay response")?;
        self.echo("GET", &url, None, status, &body);

        if !status.is_success() {
            bail!("relay returned status {}", status);
        }

        serde_json::from_str(&body).context("Invalid question payload from relay")
    }

    /// Returns the verdict body verbatim; the relay already trimmed it.
    pub fn submit_answer(&self, question: &str, answer: &str) -> Result<String> {
        let url = format!("{}/api/answer", self.base_url);
        let payload = json!({ "question": question, "answer": answer });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .context("Failed to reach relay")?;

        let status = response.status();
        let body = response.text().context("Failed to read relay response")?;
        self.echo("POST", &url, Some(&payload.to_string()), status, &body);

        if !status.is_success() {
            bail!("relay returned status {}", status);
        }

        Ok(body)
    }

    // Raw exchanges go to stderr so they never mix with the quiz screen.
    fn echo(
        &self,
        method: &str,
        url: &str,
        request_body: Option<&str>,
        status: reqwest::StatusCode,
        response_body: &str,
    ) {
        if !self.debug {
            return;
        }
        match request_body {
            Some(sent) => eprintln!("[debug] {} {} {}", method, url, sent),
            None => eprintln!("[debug] {} {}", method, url),
        }
        eprintln!("[debug] {} {}", status, response_body);
    }
}
