// Profile and profile image commands

use crate::output::{print_field, OutputFormat};
use anyhow::{Context, Result};
use authdemo_client::avatar::DEFAULT_SIZE;
use authdemo_client::{Account, Avatar, ImageFile};
use serde_json::{json, Value};
use std::path::Path;

pub async fn show(account: &Account, output: OutputFormat) -> Result<()> {
    let profile = account.profile().await?;

    if output.is_text() {
        if let Some(id) = profile.id {
            print_field("ID", &id.to_string());
        }
        print_field("Email", profile.email.as_deref().unwrap_or("-"));
        print_field("Nickname", profile.nickname.as_deref().unwrap_or("-"));
        match Avatar::for_profile(&profile) {
            Avatar::Image { url } => print_field("Image", &account.api().url(&url)),
            Avatar::Initial { letter } => print_field("Image", &format!("none ({})", letter)),
        }
    } else {
        output.print_value(&profile)?;
    }

    Ok(())
}

pub async fn upload(account: &Account, output: OutputFormat, quiet: bool, file: &Path) -> Result<()> {
    let image = ImageFile::from_path(file)
        .await
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let uploaded = account.upload_profile_image(image).await?;

    if output.is_text() {
        if quiet {
            println!("{}", uploaded.url);
        } else {
            println!("Uploaded profile image");
            print_field("Filename", &uploaded.filename);
            print_field("URL", &account.api().url(&uploaded.url));
        }
    } else {
        output.print_value(&uploaded)?;
    }

    Ok(())
}

pub async fn avatar(
    account: &Account,
    output: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    let profile = account.profile().await?;
    let avatar = Avatar::for_profile(&profile);

    match (&avatar, output_file) {
        (Avatar::Image { url }, Some(path)) => {
            let bytes = account.fetch_image(url).await?;
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
            if output.is_text() {
                println!("Saved {} bytes to {}", bytes.len(), path.display());
            } else {
                let mut value = avatar_value(&avatar, Some(account.api().url(url)));
                value["saved_to"] = path.display().to_string().into();
                value["bytes"] = bytes.len().into();
                output.print_value(&value)?;
            }
        }
        (Avatar::Image { url }, None) => {
            let full = account.api().url(url);
            if output.is_text() {
                println!("{}", full);
            } else {
                output.print_value(&avatar_value(&avatar, Some(full)))?;
            }
        }
        (Avatar::Initial { letter }, _) => {
            if output.is_text() {
                println!("No profile image set (initial: {})", letter);
            } else {
                output.print_value(&avatar_value(&avatar, None))?;
            }
        }
    }

    Ok(())
}

/// Structured avatar description, sized as the web profile renders it
fn avatar_value(avatar: &Avatar, url: Option<String>) -> Value {
    let initial = match avatar {
        Avatar::Image { .. } => None,
        Avatar::Initial { letter } => Some(letter.clone()),
    };
    json!({
        "url": url,
        "initial": initial,
        "size": DEFAULT_SIZE,
    })
}
