use thiserror::Error;

pub type CopyResult<T> = Result<T, CopyError>;

#[derive(Error, Debug)]
pub enum CopyError {
    /// The sheet contained none of the recognized section markers.
    #[error("No recognized sections found (expected markers such as Hero, About Us, carousel, Contact Us)")]
    EmptyResult,

    /// Every repair pass failed on the model's response text.
    #[error("Model output is not valid JSON and automatic repair failed: {0}")]
    MalformedModelOutput(String),

    #[error("Model service request failed with status {status}: {body}")]
    ExternalService { status: u16, body: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    /// Transport failure talking to the model service. Never carries the
    /// request URL.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for CopyError {
    fn from(e: reqwest::Error) -> Self {
        CopyError::Http(e.without_url())
    }
}

impl CopyError {
    /// One-line status message for end users. The full error goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            CopyError::EmptyResult => {
                "Could not find any valid sections (Hero, About Us, ...) in the sheet. Check that it follows the template.".to_string()
            }
            CopyError::MalformedModelOutput(_) => {
                "The model returned output that could not be repaired into JSON. Inspect the logs for the raw response.".to_string()
            }
            CopyError::ExternalService { status, body } => {
                format!("Model request failed: {} {}", status, body)
            }
            CopyError::Busy => "A generation is already running, please wait.".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status the API layer reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CopyError::EmptyResult | CopyError::InvalidInput(_) | CopyError::Json(_) => 400,
            CopyError::Csv(_) | CopyError::Yaml(_) | CopyError::Sheet(_) => 400,
            CopyError::Config(_) => 400,
            CopyError::Busy => 409,
            CopyError::MalformedModelOutput(_) | CopyError::ExternalService { .. } => 502,
            CopyError::Http(_) => 502,
            _ => 500,
        }
    }
}
