use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum RestampError {
    #[error("Invalid deployment count: {count}")]
    #[diagnostic(help("Deployment count must be larger than 0"))]
    InvalidDeploymentCount { count: u32 },

    #[error("Unable to read template file: {path}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse template YAML: {path}")]
    #[diagnostic(help("The template must be a YAML document of nested mappings and scalars"))]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported template structure: {reason}")]
    TemplateInvalid { reason: String },

    #[error("Invalid answer for '{label}': {message}")]
    ValidationFailed { label: String, message: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Failed to encode document as YAML")]
    Encode {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RestampError>;
