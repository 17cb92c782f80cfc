use crate::cli::{OutputFormat, RulesArgs, ValidateArgs};
use crate::config::Config;
use crate::render;
use anyhow::Context;
use formcheck_terminology_client::TerminologyClient;
use formcheck_validator::{FormValidator, LookupFailurePolicy, ValidationReport};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Report for one schema file
#[derive(Debug)]
pub struct FormResult {
    pub path: PathBuf,
    pub report: ValidationReport,
}

pub async fn validate(config: &Config, args: &ValidateArgs) -> anyhow::Result<ExitCode> {
    let results = validate_files(config, args).await?;

    match args.format {
        OutputFormat::Text => {
            for result in &results {
                print!("{}", render::text(&result.path, &result.report));
            }
        }
        OutputFormat::Json => {
            let document =
                render::json(results.iter().map(|r| (r.path.as_path(), &r.report)));
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    if results.iter().all(|r| r.report.is_valid()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Validate each schema file in turn; lookups within a form run concurrently.
pub async fn validate_files(
    config: &Config,
    args: &ValidateArgs,
) -> anyhow::Result<Vec<FormResult>> {
    let validator = build_validator(config, args)?;
    let mut results = Vec::with_capacity(args.schemas.len());

    for path in &args.schemas {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read schema {}", path.display()))?;

        tracing::info!(schema = %path.display(), "Validating form");
        let report = validator.validate(text).await;

        results.push(FormResult {
            path: path.clone(),
            report,
        });
    }

    Ok(results)
}

pub fn build_validator(config: &Config, args: &ValidateArgs) -> anyhow::Result<FormValidator> {
    let mut validator_config = config.validator_config(args.rules.as_deref())?;
    if let Some(limit) = args.max_concurrent {
        validator_config.max_concurrent_lookups = Some(limit);
    }
    if args.report_lookup_failures {
        validator_config.lookup_failures = LookupFailurePolicy::Report;
    }

    let mut client_config = config.terminology.clone();
    if let Some(base_url) = &args.base_url {
        client_config.base_url = base_url.clone();
    }
    if let Some(username) = &args.username {
        client_config.username = Some(username.clone());
    }
    if let Some(timeout_secs) = args.timeout_secs {
        client_config = client_config.with_timeout_secs(timeout_secs);
    }

    tracing::debug!(terminology = ?client_config, "Building terminology client");
    let client =
        TerminologyClient::new(client_config).context("Failed to create terminology client")?;

    FormValidator::from_config(Arc::new(client), validator_config)
        .context("Invalid validator configuration")
}

pub fn rules(config: &Config, args: &RulesArgs) -> anyhow::Result<ExitCode> {
    let validator_config = config.validator_config(args.rules.as_deref())?;
    print!("{}", validator_config.to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
