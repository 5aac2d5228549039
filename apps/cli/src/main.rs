#![deny(warnings)]

//! Headless CLI for the economy calculators.
//!
//! Resolves nations and world state from a JSON data directory and prints
//! costs and revenues the way the game displays them.

use anyhow::{anyhow, bail, Context, Result};
use knox_core::{NationId, NationSnapshot, NationSource, Resource, WorldSource};
use knox_data::JsonStore;
use knox_econ::{Quote, Revenue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: knox [--config FILE] [--data DIR] [--json] <command>

commands:
  infra <start> <end> [--nation ID]   cost of buying infrastructure
  land <start> <end> [--nation ID]    cost of buying land
  city <start> <end> [--nation ID]    cost of buying cities
  food <nation ID>                    daily food revenue
  revenue <resource> <nation ID>      daily revenue of any resource
  market <resource>                   best buy and sell offers
  version                             build information";

const DEFAULT_CONFIG: &str = "knox.yaml";
const DEFAULT_DATA_DIR: &str = "./data";
const DATA_DIR_ENV: &str = "KNOX_DATA_DIR";
const MAX_LEVEL: f64 = 1_000_000.0;
const MAX_CITIES: f64 = 1_000.0;

/// Settings read from `knox.yaml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Config {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Upgrade {
    Infrastructure,
    Land,
    City,
}

#[derive(Debug, PartialEq)]
enum Command {
    Cost {
        kind: Upgrade,
        start: f64,
        end: f64,
        nation: Option<NationId>,
    },
    Food(NationId),
    Revenue(String, NationId),
    Market(String),
    Version,
}

#[derive(Debug, PartialEq)]
struct Cli {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    json: bool,
    command: Command,
}

fn parse_number(s: &str, what: &str) -> Result<f64> {
    let v: f64 = s
        .parse()
        .with_context(|| format!("{what} must be a number, got {s:?}"))?;
    if !v.is_finite() {
        bail!("{what} must be finite");
    }
    Ok(v)
}

fn parse_nation(s: &str) -> Result<NationId> {
    s.parse()
        .map(NationId)
        .with_context(|| format!("nation id must be a positive integer, got {s:?}"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli> {
    let mut config = None;
    let mut data = None;
    let mut json = false;
    let mut nation = None;
    let mut positional = Vec::new();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => config = Some(it.next().context("--config needs a path")?.into()),
            "--data" => data = Some(it.next().context("--data needs a directory")?.into()),
            "--nation" => nation = Some(parse_nation(&it.next().context("--nation needs an id")?)?),
            "--json" => json = true,
            "-h" | "--help" => bail!("{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let command = match positional.iter().map(String::as_str).collect::<Vec<_>>()[..] {
        [kind @ ("infra" | "land" | "city"), start, end] => {
            let kind = match kind {
                "infra" => Upgrade::Infrastructure,
                "land" => Upgrade::Land,
                _ => Upgrade::City,
            };
            let (start, end) = (parse_number(start, "start")?, parse_number(end, "end")?);
            let max = if kind == Upgrade::City { MAX_CITIES } else { MAX_LEVEL };
            for (what, v) in [("start", start), ("end", end)] {
                if !(0.0..=max).contains(&v) {
                    bail!("{what} must be between 0 and {max}, got {v}");
                }
            }
            if kind == Upgrade::City && (start.fract() != 0.0 || end.fract() != 0.0) {
                bail!("city counts must be whole numbers");
            }
            Command::Cost {
                kind,
                start,
                end,
                nation: nation.take(),
            }
        }
        ["food", id] => Command::Food(parse_nation(id)?),
        ["revenue", resource, id] => Command::Revenue(resource.to_string(), parse_nation(id)?),
        ["market", resource] => Command::Market(resource.to_string()),
        ["version"] => Command::Version,
        _ => bail!("{USAGE}"),
    };
    if nation.is_some() {
        bail!("--nation only applies to infra, land and city");
    }
    Ok(Cli {
        config,
        data,
        json,
        command,
    })
}

/// Read the config file. The default path may be absent; an explicit one may not.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    match fs::read_to_string(&path) {
        Ok(text) => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display())),
        Err(e) if !explicit && e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("cannot read config {}", path.display())),
    }
}

/// `--data` beats `KNOX_DATA_DIR`, which beats the config file.
fn resolve_data_dir(flag: Option<PathBuf>, env: Option<String>, config: &Config) -> PathBuf {
    flag.or_else(|| env.filter(|s| !s.is_empty()).map(PathBuf::from))
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Insert thousands separators into a plain decimal string such as `-1234.50`.
fn group_digits(plain: &str) -> String {
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn amount(v: f64) -> String {
    group_digits(&format!("{v:.2}"))
}

/// `$ 1,234.56`, sign ahead of the currency symbol.
fn dollars(grouped: String) -> String {
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-$ {rest}"),
        None => format!("$ {grouped}"),
    }
}

fn money(v: f64) -> String {
    dollars(amount(v))
}

fn describe(nation: &NationSnapshot) -> String {
    if nation.name.is_empty() {
        format!("nation {}", nation.id)
    } else {
        format!("{} ({})", nation.name, nation.id)
    }
}

#[derive(Serialize)]
struct CostReport<'a> {
    kind: &'static str,
    start: f64,
    end: f64,
    nation: Option<&'a str>,
    cost: f64,
}

#[derive(Serialize)]
struct RevenueReport<'a> {
    nation: NationId,
    name: &'a str,
    resource: Resource,
    #[serde(flatten)]
    revenue: Revenue,
}

fn revenue_text(nation: &NationSnapshot, resource: Resource, r: &Revenue) -> String {
    let title = resource.as_str();
    let mut chars = title.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!(
        "{title} statistics for {}:\nProduction: {}\nUsage: {}\nNet: {}",
        describe(nation),
        amount(r.production),
        amount(r.usage),
        amount(r.net)
    )
}

fn quote_text(q: &Quote) -> String {
    format!(
        "{} market: best buy {} | best sell {}",
        q.resource,
        money_decimal(q.best_buy),
        money_decimal(q.best_sell)
    )
}

fn money_decimal(d: rust_decimal::Decimal) -> String {
    dollars(group_digits(&format!("{:.2}", d)))
}

/// Execute one command against `store` and render its output.
fn run(command: &Command, store: &JsonStore, json: bool) -> Result<String> {
    match command {
        Command::Cost {
            kind,
            start,
            end,
            nation,
        } => {
            let nation = nation.map(|id| store.nation(id)).transpose()?;
            let cost = match kind {
                Upgrade::Infrastructure => knox_econ::infrastructure_cost(*start, *end, nation.as_ref()),
                Upgrade::Land => knox_econ::land_cost(*start, *end, nation.as_ref()),
                Upgrade::City => {
                    knox_econ::city_cost(*start as i64, *end as i64, nation.as_ref())
                }
            };
            let label = match kind {
                Upgrade::Infrastructure => "infrastructure",
                Upgrade::Land => "land",
                Upgrade::City => "city",
            };
            info!(kind = label, start, end, cost, "computed upgrade cost");
            if json {
                let report = CostReport {
                    kind: label,
                    start: *start,
                    end: *end,
                    nation: nation.as_ref().map(|n| n.name.as_str()),
                    cost,
                };
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            let target = match &nation {
                Some(n) => format!(" for {}", describe(n)),
                None => String::new(),
            };
            let (from, to) = if *kind == Upgrade::City {
                (format!("{start}"), format!("{end}"))
            } else {
                (amount(*start), amount(*end))
            };
            Ok(format!(
                "The {label} cost to go from {from} to {to}{target} is: {}",
                money(cost)
            ))
        }
        Command::Food(id) => {
            let nation = store.nation(*id)?;
            let world = store.world_state()?;
            let revenue = knox_econ::food_revenue(&nation, &world)?;
            render_revenue(&nation, Resource::Food, revenue, json)
        }
        Command::Revenue(resource, id) => {
            let resource: Resource = resource
                .parse()
                .map_err(|e| anyhow!("{e}"))?;
            let nation = store.nation(*id)?;
            let world = if resource == Resource::Food {
                Some(store.world_state()?)
            } else {
                None
            };
            let revenue = knox_econ::resource_revenue(&nation, world.as_ref(), resource)?;
            render_revenue(&nation, resource, revenue, json)
        }
        Command::Market(resource) => {
            let quote = knox_econ::market_info(store, resource)?;
            if json {
                return Ok(serde_json::to_string_pretty(&quote)?);
            }
            Ok(quote_text(&quote))
        }
        Command::Version => Ok(format!(
            "knox {} ({}, committed {})",
            env!("CARGO_PKG_VERSION"),
            env!("KNOX_COMMIT"),
            env!("KNOX_COMMIT_DATE")
        )),
    }
}

fn render_revenue(
    nation: &NationSnapshot,
    resource: Resource,
    revenue: Revenue,
    json: bool,
) -> Result<String> {
    debug!(nation = %nation.id, %resource, ?revenue, "rendering revenue");
    if json {
        let report = RevenueReport {
            nation: nation.id,
            name: &nation.name,
            resource,
            revenue,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(revenue_text(nation, resource, &revenue))
}

fn main() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;
    let config = load_config(cli.config.as_deref())?;

    // Logging setup
    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = resolve_data_dir(cli.data.clone(), std::env::var(DATA_DIR_ENV).ok(), &config);
    info!(data_dir = %data_dir.display(), command = ?cli.command, "starting CLI");
    let store = JsonStore::new(&data_dir);

    println!("{}", run(&cli.command, &store, cli.json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nations")).unwrap();
        fs::write(
            dir.path().join("world.json"),
            r#"{ "game_date": "2024-01-10", "radiation": { "europe": 100.0 } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("nations/12.json"),
            r#"{ "id": 12, "nation_name": "Avalon", "population": 50000.0, "soldiers": 0,
                 "continent": "eu", "domestic_policy": "URBANIZATION",
                 "advanced_engineering_corps": true,
                 "cities": [{ "farm": 1, "land": 500.0, "oil_well": 2, "powered": true }] }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("market.json"),
            r#"{ "food": { "buy": ["101.5"], "sell": ["1234.25"] } }"#,
        )
        .unwrap();
        let store = JsonStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn parses_cost_commands() {
        let cli = parse_args(args("--data /tmp/d infra 10 110.5 --nation 12")).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/d")));
        assert_eq!(
            cli.command,
            Command::Cost {
                kind: Upgrade::Infrastructure,
                start: 10.0,
                end: 110.5,
                nation: Some(NationId(12)),
            }
        );
        assert!(parse_args(args("city 10 11.5")).is_err());
        assert!(parse_args(args("food 12 --nation 3")).is_err());
        assert!(parse_args(args("infra ten 20")).is_err());
        assert!(parse_args(args("infra 0 1e17")).is_err());
        assert!(parse_args(args("land -5 20")).is_err());
        assert!(parse_args(args("city 1 5000")).is_err());
        assert!(parse_args(args("land 0 1000000")).is_ok());
        assert!(parse_args(args("teleport")).is_err());
    }

    #[test]
    fn parses_lookup_commands() {
        let cli = parse_args(args("--json revenue coal 12")).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command, Command::Revenue("coal".into(), NationId(12)));
        assert_eq!(
            parse_args(args("market steel")).unwrap().command,
            Command::Market("steel".into())
        );
        assert_eq!(parse_args(args("version")).unwrap().command, Command::Version);
    }

    #[test]
    fn data_dir_precedence() {
        let config = Config {
            data_dir: Some("/from/config".into()),
            log_level: None,
        };
        assert_eq!(
            resolve_data_dir(Some("/flag".into()), Some("/env".into()), &config),
            PathBuf::from("/flag")
        );
        assert_eq!(
            resolve_data_dir(None, Some("/env".into()), &config),
            PathBuf::from("/env")
        );
        assert_eq!(
            resolve_data_dir(None, Some(String::new()), &config),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            resolve_data_dir(None, None, &Config::default()),
            PathBuf::from(DEFAULT_DATA_DIR)
        );
    }

    #[test]
    fn config_file_is_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knox.yaml");
        fs::write(&path, "data_dir: /srv/knox\nlog_level: debug\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/knox")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn formats_money_with_separators() {
        assert_eq!(money(1_234_567.891), "$ 1,234,567.89");
        assert_eq!(money(-1500.0), "-$ 1,500.00");
        assert_eq!(money(12.5), "$ 12.50");
        assert_eq!(amount(999.999), "1,000.00");
        assert_eq!(group_digits("123456"), "123,456");
    }

    #[test]
    fn infra_cost_with_nation_discounts() {
        let (_dir, store) = store();
        let plain = run(
            &Command::Cost {
                kind: Upgrade::Infrastructure,
                start: 10.0,
                end: 60.0,
                nation: None,
            },
            &store,
            false,
        )
        .unwrap();
        assert_eq!(
            plain,
            "The infrastructure cost to go from 10.00 to 60.00 is: $ 15,000.00"
        );
        let discounted = run(
            &Command::Cost {
                kind: Upgrade::Infrastructure,
                start: 10.0,
                end: 60.0,
                nation: Some(NationId(12)),
            },
            &store,
            false,
        )
        .unwrap();
        assert_eq!(
            discounted,
            "The infrastructure cost to go from 10.00 to 60.00 for Avalon (12) is: $ 12,825.00"
        );
    }

    #[test]
    fn city_cost_prints_whole_counts() {
        let (_dir, store) = store();
        let out = run(
            &Command::Cost {
                kind: Upgrade::City,
                start: 10.0,
                end: 11.0,
                nation: None,
            },
            &store,
            false,
        )
        .unwrap();
        assert_eq!(out, "The city cost to go from 10 to 11 is: $ 38,025,000.00");
    }

    #[test]
    fn food_in_european_winter() {
        let (_dir, store) = store();
        let out = run(&Command::Food(NationId(12)), &store, false).unwrap();
        // 1 farm * 12 * (500 / 500) * 0.8 winter * 0.9 radiation
        assert_eq!(
            out,
            "Food statistics for Avalon (12):\nProduction: 8.64\nUsage: 50.00\nNet: -41.36"
        );
    }

    #[test]
    fn revenue_json_and_errors() {
        let (_dir, store) = store();
        let out = run(&Command::Revenue("oil".into(), NationId(12)), &store, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["resource"], "oil");
        // 2 wells * 3 * (1 + 0.06)
        assert_eq!(v["production"], 6.36);
        assert_eq!(v["usage"], 0.0);

        let err = run(&Command::Revenue("gold".into(), NationId(12)), &store, false).unwrap_err();
        assert!(err.to_string().contains("gold is not a valid resource"));
        let err = run(&Command::Food(NationId(99)), &store, false).unwrap_err();
        assert!(err.to_string().contains("no nation exists with nation id 99"));
    }

    #[test]
    fn version_names_the_commit() {
        let (_dir, store) = store();
        let out = run(&Command::Version, &store, false).unwrap();
        assert!(out.starts_with(concat!("knox ", env!("CARGO_PKG_VERSION"), " (")));
        assert!(out.contains(", committed "));
    }

    #[test]
    fn market_quote_text() {
        let (_dir, store) = store();
        let out = run(&Command::Market("food".into()), &store, false).unwrap();
        assert_eq!(out, "food market: best buy $ 101.50 | best sell $ 1,234.25");
    }
}
