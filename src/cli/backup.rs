//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use super::confirm_on_stdin;
use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::CashbookPaths;
use crate::config::settings::Settings;
use crate::error::{CashbookError, CashbookResult};

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Create a new backup and prune old ones
    Create,

    /// List all available backups
    List,

    /// Restore the ledger from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete backups beyond the retention count
    Prune,
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &CashbookPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> CashbookResult<()> {
    let manager = BackupManager::new(paths, settings.backup_retention);

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: cashbook backup create");
                return Ok(());
            }

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let marker = if backup.is_corrupt_copy { " [unreadable ledger]" } else { "" };

                println!(
                    "  {}. {} ({} ago, {}){}",
                    i + 1,
                    backup.filename,
                    format_duration(age),
                    format_size(backup.size_bytes),
                    marker,
                );
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;

            if !force {
                let prompt = format!("Replace the current ledger with {}?", backup_path.display());
                if !confirm_on_stdin(&prompt)? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            if paths.ledger_file().exists() {
                let pre_restore = manager.create_backup()?;
                println!("Current ledger saved to: {}", pre_restore.display());
            }

            let count = RestoreManager::new(paths).restore_from_file(&backup_path)?;
            println!("Restored {} transaction(s).", count);
        }

        BackupCommands::Prune => {
            let deleted = manager.enforce_retention()?;
            if deleted.is_empty() {
                println!(
                    "No backups to prune (keeping up to {}).",
                    settings.backup_retention
                );
            } else {
                println!("Deleted {} backup(s).", deleted.len());
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> CashbookResult<PathBuf> {
    let not_found = || CashbookError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    };

    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .list_backups()?
            .into_iter()
            .find(|b| !b.is_corrupt_copy)
            .map(|b| b.path)
            .ok_or_else(not_found);
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    manager
        .get_backup(backup)
        .or_else(|| manager.get_backup(&format!("{}.json", backup)))
        .map(|b| b.path)
        .ok_or_else(not_found)
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
