//! Output formatting for CLI commands.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::domain::models::User;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub user: User,
}

impl CommandOutput for UserOutput {
    fn to_human(&self) -> String {
        let user = &self.user;
        let mut table = base_table();
        table.set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec!["ID", user.id.as_str()]);
        table.add_row(vec!["Name", user.name.as_str()]);
        table.add_row(vec!["Email", user.email.as_str()]);
        table.add_row(vec![
            "Last login".to_string(),
            user.last_login
                .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]);

        if let Some(prefs) = &user.preferences {
            table.add_row(vec!["Theme".to_string(), prefs.theme.to_string()]);
            table.add_row(vec!["Notifications".to_string(), prefs.notifications.to_string()]);
            table.add_row(vec!["Language".to_string(), prefs.language.clone()]);
        }

        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreOutput {
    pub id: String,
    pub score: i64,
}

impl CommandOutput for ScoreOutput {
    fn to_human(&self) -> String {
        format!("User {} scores {}", self.id, self.score)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for ActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
