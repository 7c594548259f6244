//! Publish command - push a report summary to a GitHub Project item

use colored::Colorize;

use super::PublishArgs;
use crate::cli::exit_codes;
use crate::error::AuditError;
use crate::providers::{publish_report, GraphQlProjectsApi, PublishConfig};

pub async fn execute(args: PublishArgs) -> Result<i32, AuditError> {
    let owner = args.owner.ok_or(AuditError::MissingEnv("GITHUB_OWNER"))?;
    let item_key = args
        .item_key
        .ok_or(AuditError::MissingEnv("PROJECT_ITEM_KEY"))?;

    let cfg = PublishConfig {
        owner,
        project_number: args.project_number,
        item_key,
    };

    let api = GraphQlProjectsApi::from_env()?;
    let item_id = publish_report(&api, &cfg, &args.report, args.trend.as_deref()).await?;

    println!(
        "{} Published report summary to project item {}",
        "Success:".green().bold(),
        item_id.cyan()
    );

    Ok(exit_codes::SUCCESS)
}
