//! `mdlegal settings`: read and write the theme/office settings blobs

use std::path::Path;

use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};

use mdlegal_core::{SettingsBlob, SettingsKey, SettingsStore};

use super::Context;

#[derive(Parser, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print one value
    Get {
        #[arg(value_enum)]
        blob: BlobArg,
        key: String,
    },
    /// Set a value (true/false, numbers and null keep their type)
    Set {
        #[arg(value_enum)]
        blob: BlobArg,
        key: String,
        value: String,
    },
    /// Remove a value
    Unset {
        #[arg(value_enum)]
        blob: BlobArg,
        key: String,
    },
    /// Print a whole blob as JSON
    Show {
        #[arg(value_enum)]
        blob: BlobArg,
    },
}

/// Which settings blob to address
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobArg {
    /// md-legal-theme
    Theme,
    /// md-legal-office
    Office,
}

impl From<BlobArg> for SettingsKey {
    fn from(blob: BlobArg) -> Self {
        match blob {
            BlobArg::Theme => SettingsKey::Theme,
            BlobArg::Office => SettingsKey::Office,
        }
    }
}

pub fn run_settings(args: SettingsArgs, ctx: &Context) -> Result<()> {
    let store = SettingsStore::new(ctx.config.settings_dir());
    let output = execute(&store, args.command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn load(store: &SettingsStore, blob: BlobArg) -> Result<SettingsBlob> {
    let key = SettingsKey::from(blob);
    store
        .load(key)
        .with_context(|| format!("Failed to read {}", display_path(&store.path_for(key))))
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Run one settings command against a store and return what to print
pub fn execute(store: &SettingsStore, command: SettingsCommands) -> Result<String> {
    match command {
        SettingsCommands::Get { blob, key } => {
            let settings = load(store, blob)?;
            let value = settings.get(&key).ok_or_else(|| {
                anyhow!("'{}' is not set in {}", key, settings.key().storage_name())
            })?;
            Ok(match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        }
        SettingsCommands::Set { blob, key, value } => {
            let mut settings = load(store, blob)?;
            settings.set_raw(key, &value)?;
            store.save(&settings)?;
            Ok(String::new())
        }
        SettingsCommands::Unset { blob, key } => {
            let mut settings = load(store, blob)?;
            if settings.remove(&key).is_none() {
                return Err(anyhow!("'{}' is not set in {}", key, settings.key().storage_name()));
            }
            store.save(&settings)?;
            Ok(String::new())
        }
        SettingsCommands::Show { blob } => {
            let settings = load(store, blob)?;
            let map: serde_json::Map<String, serde_json::Value> = settings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            serde_json::to_string_pretty(&map).context("Failed to serialize settings")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_get_unset_round() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path());

        execute(
            &store,
            SettingsCommands::Set {
                blob: BlobArg::Office,
                key: "officeName".into(),
                value: "MD Legal Advocacia".into(),
            },
        )
        .unwrap();
        execute(
            &store,
            SettingsCommands::Set {
                blob: BlobArg::Theme,
                key: "darkMode".into(),
                value: "true".into(),
            },
        )
        .unwrap();

        let name = execute(
            &store,
            SettingsCommands::Get {
                blob: BlobArg::Office,
                key: "officeName".into(),
            },
        )
        .unwrap();
        assert_eq!(name, "MD Legal Advocacia");

        let theme = execute(&store, SettingsCommands::Show { blob: BlobArg::Theme }).unwrap();
        assert!(theme.contains("\"darkMode\": true"));

        execute(
            &store,
            SettingsCommands::Unset {
                blob: BlobArg::Office,
                key: "officeName".into(),
            },
        )
        .unwrap();
        assert!(execute(
            &store,
            SettingsCommands::Get {
                blob: BlobArg::Office,
                key: "officeName".into(),
            },
        )
        .is_err());
    }

    #[test]
    fn show_of_missing_blob_is_empty_object() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        let out = execute(&store, SettingsCommands::Show { blob: BlobArg::Office }).unwrap();
        assert_eq!(out, "{}");
    }
}
