// Login, registration and session commands

use crate::output::{print_field, OutputFormat};
use anyhow::Result;
use authdemo_client::{Account, Credentials, Me, Registration};

fn print_me(me: &Me) {
    print_field("ID", &me.id.to_string());
    print_field("Email", &me.email);
    print_field("Nickname", &me.nickname);
}

pub async fn register(
    account: &Account,
    output: OutputFormat,
    quiet: bool,
    email: String,
    password: String,
    nickname: String,
) -> Result<()> {
    let me = account
        .register(&Registration::new(email, password, nickname))
        .await?;

    if output.is_text() {
        if quiet {
            println!("{}", me.id);
        } else {
            println!("Registered and logged in as {}", me.email);
            print_me(&me);
        }
    } else {
        output.print_value(&me)?;
    }

    Ok(())
}

pub async fn login(
    account: &Account,
    output: OutputFormat,
    quiet: bool,
    email: String,
    password: String,
) -> Result<()> {
    let me = account.login(&Credentials::new(email, password)).await?;

    if output.is_text() {
        if quiet {
            println!("{}", me.id);
        } else {
            println!("Logged in as {}", me.email);
            print_me(&me);
        }
    } else {
        output.print_value(&me)?;
    }

    Ok(())
}

pub fn logout(account: &Account, output: OutputFormat, quiet: bool) -> Result<()> {
    account.logout()?;

    if output.is_text() && !quiet {
        println!("Logged out");
    } else if !output.is_text() {
        output.print_value(&serde_json::json!({ "status": "logged_out" }))?;
    }

    Ok(())
}

pub async fn whoami(account: &Account, output: OutputFormat) -> Result<()> {
    let had_token = account.is_logged_in();
    let me = account.restore().await;

    if !output.is_text() {
        return output.print_value(&me);
    }

    match me {
        Some(me) => print_me(&me),
        None if had_token => println!("Session is no longer valid; logged out"),
        None => println!("Not logged in"),
    }

    Ok(())
}
