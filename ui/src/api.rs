use contact_types::{ErrorResponse, Submission, SuccessResponse};
use thiserror::Error;

const API_BASE_URL: &str = match option_env!("CONTACT_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("relay answered {status}: {message}")]
    Rejected { status: u16, message: String },
}

pub struct ApiClient {
    client: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&self, submission: &Submission) -> Result<SuccessResponse, ApiError> {
        let response = self
            .client
            .post(format!("{API_BASE_URL}/api/contact"))
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
