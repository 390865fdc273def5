//! sitecopy API server binary
//!
//! HTTP REST API for template parsing, model-output recovery, export and
//! generation.

use clap::Parser;
use sitecopy::api::{run_api_server, ApiConfig};
use sitecopy::config::ModelSettings;

#[derive(Parser, Debug)]
#[command(name = "sitecopy-server")]
#[command(version)]
#[command(about = "sitecopy API Server - HTTP API for website copy generation")]
#[command(long_about = r#"
sitecopy API Server

Endpoints:
  - POST /api/v1/parse       - Template rows or CSV text → content tree
  - POST /api/v1/recover     - Raw model output → content tree
  - POST /api/v1/export      - Content tree → output rows + CSV text
  - POST /api/v1/export/csv  - Content tree → CSV download
  - POST /api/v1/generate    - Full generation (one at a time, 409 while busy)

Additional endpoints:
  - GET  /health             - Health check
  - GET  /version            - Server version info
  - GET  /                   - API documentation

Example usage:
  sitecopy-server                           # Start on localhost:8080
  sitecopy-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/recover \
    -H "Content-Type: application/json" \
    -d '{"text": "```json\n{\"hero\": {\"title\": \"Hi\"}}\n```"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SITECOPY_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SITECOPY_PORT")]
    port: u16,

    /// Default model API key for requests that carry none
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "SITECOPY_MODEL_ENDPOINT")]
    model_endpoint: Option<String>,

    #[arg(long, env = "SITECOPY_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        settings: ModelSettings::with_overrides(
            args.model_endpoint.as_deref(),
            args.model.as_deref(),
        ),
        api_key: args.api_key,
    };

    run_api_server(config).await
}
