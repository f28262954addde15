// Account settings commands

use crate::output::{print_field, OutputFormat};
use anyhow::Result;
use authdemo_client::{Account, PasswordChange};

pub async fn nickname(
    account: &Account,
    output: OutputFormat,
    quiet: bool,
    nickname: &str,
) -> Result<()> {
    let me = account.update_nickname(nickname).await?;

    if output.is_text() {
        if !quiet {
            println!("Nickname updated");
            print_field("Nickname", &me.nickname);
        }
    } else {
        output.print_value(&me)?;
    }

    Ok(())
}

pub async fn password(
    account: &Account,
    output: OutputFormat,
    quiet: bool,
    current: String,
    new: String,
    confirm: String,
) -> Result<()> {
    account
        .change_password(&PasswordChange::new(current, new, confirm))
        .await?;

    if output.is_text() && !quiet {
        println!("Password changed");
    } else if !output.is_text() {
        output.print_value(&serde_json::json!({ "status": "password_changed" }))?;
    }

    Ok(())
}
