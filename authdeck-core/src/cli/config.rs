use crate::config::load_config;
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check,

    /// Print resolved configuration (file + environment)
    Dump {
        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd, path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCmd::Check => check(path),
        ConfigCmd::Dump { json, yaml } => dump(path, json, yaml),
    }
}

pub fn check(path: Option<&Path>) -> Result<()> {
    let cfg = load_config(path)?;

    println!("✔ Config loaded successfully");
    println!("✔ api_url {}", cfg.base_url()?);
    println!("✔ timeout {}s", cfg.timeout_secs);
    println!("✔ refresh every {}s", cfg.refresh_interval_secs);
    match &cfg.known_methods {
        Some(methods) => println!("✔ {} known methods", methods.len()),
        None => println!("✔ all methods charted"),
    }

    Ok(())
}

pub fn dump(path: Option<&Path>, json: bool, yaml: bool) -> Result<()> {
    let cfg = load_config(path)?;

    if yaml {
        dump_yaml(&cfg)?;
    } else if json || !yaml {
        // default: json
        dump_json(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
