use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Groq API key
    pub groq_api_key: String,

    /// Groq base URL (optional)
    pub groq_base_url: Option<String>,

    /// Model name for LLM operations
    pub model_name: Option<String>,

    /// Path to the ontology CSV dataset
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> String {
    "data/onto_x.csv".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let settings = Settings {
            groq_api_key: env::var("GROQ_API_KEY")
                .map_err(|_| anyhow::anyhow!("GROQ_API_KEY environment variable is required"))?,
            groq_base_url: env::var("GROQ_BASE_URL").ok(),
            model_name: env::var("MODEL_NAME").ok(),
            dataset_path: env::var("DATASET_PATH").unwrap_or_else(|_| default_dataset_path()),
            host: env::var("HOST").unwrap_or_else(|_| default_host()),
            port: env::var("PORT")
                .map(|p| p.parse().unwrap_or(default_port()))
                .unwrap_or(default_port()),
        };

        Ok(settings)
    }

    /// Get the server address as a string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
