//! User commands.

use anyhow::{Context, Result};

use crate::cli::output::{output, ActionOutput, ScoreOutput, UserOutput};
use crate::cli::types::PrefsArgs;
use crate::services::UserService;

pub async fn fetch(service: &UserService, id: &str, json_mode: bool) -> Result<()> {
    let user = service
        .fetch_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch user {id}"))?;

    output(&UserOutput { user }, json_mode);
    Ok(())
}

pub async fn score(service: &UserService, id: &str, json_mode: bool) -> Result<()> {
    let score = service
        .score_user(id)
        .await
        .with_context(|| format!("Failed to score user {id}"))?;

    output(
        &ScoreOutput {
            id: id.to_string(),
            score,
        },
        json_mode,
    );
    Ok(())
}

pub async fn prefs(service: &UserService, args: PrefsArgs, json_mode: bool) -> Result<()> {
    let update = args.update();
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one of --theme, --notifications, --language");
    }

    let user = service
        .update_preferences(&args.id, update)
        .await
        .with_context(|| format!("Failed to update preferences for user {}", args.id))?;

    output(&UserOutput { user }, json_mode);
    Ok(())
}

pub async fn forget(service: &UserService, id: &str, json_mode: bool) -> Result<()> {
    service.forget(id).await;

    output(
        &ActionOutput {
            success: true,
            message: format!("Forgot user {id}"),
        },
        json_mode,
    );
    Ok(())
}
