use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use dialoguer::{Input, Password};

/// Ask for the Notion integration token; input is hidden, empty keeps the stored one
pub fn notion_token() -> Result<String> {
    Password::new()
        .with_prompt("Notion integration token (empty to keep)")
        .allow_empty_password(true)
        .interact()
        .wrap_err("Failed to read the Notion token")
}

/// Ask for the Notion database id, offering the stored one as default
pub fn notion_database_id(current: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt("Notion database id")
        .allow_empty(true)
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().contains(char::is_whitespace) {
                Err("a database id contains no spaces")
            } else {
                Ok(())
            }
        });
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    input.interact_text().wrap_err("Failed to read the Notion database id")
}
