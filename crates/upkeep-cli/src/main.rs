//! `upkeep` — terminal client for the upkeep maintenance dashboard.
//!
//! # Usage
//!
//! ```
//! upkeep --url http://localhost:8080 --user alice --password secret list
//! upkeep list --status overdue --sort date --order desc
//! upkeep complete 6b38dd5e-8077-4bbd-a585-9a0c37c32c5a --date 2024-03-05
//! upkeep --config ~/.config/upkeep/config.toml machines
//! ```

mod client;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use upkeep_core::{
  pipeline::{SortField, SortOrder},
  record::{Frequency, Status},
};
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "upkeep", about = "CLI for the upkeep maintenance dashboard")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the upkeep server (default: http://localhost:8080).
  #[arg(long, env = "UPKEEP_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "UPKEEP_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "UPKEEP_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List maintenance records with the dashboard's filters.
  List {
    /// Case-insensitive substring filter on the title.
    #[arg(long)]
    search:     Option<String>,
    /// pending, overdue, or completed.
    #[arg(long)]
    status:     Option<Status>,
    #[arg(long)]
    frequency:  Option<Frequency>,
    /// Only records referencing this machine id.
    #[arg(long)]
    machine:    Option<Uuid>,
    #[arg(long)]
    start_date: Option<NaiveDate>,
    #[arg(long)]
    end_date:   Option<NaiveDate>,
    /// date, status, frequency, or machine.
    #[arg(long)]
    sort:       Option<SortField>,
    /// asc or desc.
    #[arg(long)]
    order:      Option<SortOrder>,
    #[arg(long)]
    page:       Option<u32>,
    #[arg(long)]
    per_page:   Option<u32>,
  },

  /// Show one record, including its next due date.
  Show { id: Uuid },

  /// Mark a record completed and print the follow-up due date.
  Complete {
    id:   Uuid,
    /// Completion date; defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// List machines.
  Machines,

  /// List rooms.
  Rooms,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::List {
      search,
      status,
      frequency,
      machine,
      start_date,
      end_date,
      sort,
      order,
      page,
      per_page,
    } => {
      let mut query: Vec<(&str, String)> = Vec::new();
      if let Some(v) = search {
        query.push(("search", v));
      }
      if let Some(v) = status {
        query.push(("status", v.to_string()));
      }
      if let Some(v) = frequency {
        query.push(("frequency", v.to_string()));
      }
      if let Some(v) = machine {
        query.push(("machine", v.to_string()));
      }
      if let Some(v) = start_date {
        query.push(("start_date", v.to_string()));
      }
      if let Some(v) = end_date {
        query.push(("end_date", v.to_string()));
      }
      if let Some(v) = sort {
        query.push(("sort", v.to_string()));
      }
      if let Some(v) = order {
        query.push(("order", v.to_string()));
      }
      if let Some(v) = page {
        query.push(("page", v.to_string()));
      }
      if let Some(v) = per_page {
        query.push(("per_page", v.to_string()));
      }

      let list = client.list_records(&query).await?;
      print!("{}", render::records_table(&list.items));
      println!("{}", render::stats_line(&list.stats));
    }

    Command::Show { id } => {
      let item = client.get_record(id).await?;
      print!("{}", render::record_detail(&item));
      let due = client.next_due(id).await?;
      println!("next due:   {} (from {})", due.next_due, due.basis);
    }

    Command::Complete { id, date } => {
      let done = client.complete_record(id, date).await?;
      println!(
        "completed {} on {}",
        done.record.record.title,
        done
          .record
          .record
          .completed_date
          .map(|d| d.to_string())
          .unwrap_or_default(),
      );
      println!("next due {}", done.next_due);
    }

    Command::Machines => {
      let machines = client.list_machines().await?;
      print!("{}", render::machines_table(&machines));
    }

    Command::Rooms => {
      let rooms = client.list_rooms().await?;
      print!("{}", render::rooms_table(&rooms));
    }
  }

  Ok(())
}
