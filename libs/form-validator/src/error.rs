use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("form schema is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("form schema has an unexpected shape: {0}")]
    Shape(serde_json::Error),

    #[error("form schema must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
