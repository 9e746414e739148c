//! Operator tool for running a Swiss-system tournament from the shell.
//!
//! Each subcommand performs one tournament operation against the database
//! and exits.

mod config;

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Error, bail};
use log::{debug, info};
use pico_args::Arguments;
use swiss_tournament::{
    Database, Pairing, PlayerId, StandingsRow, TournamentError, TournamentManager,
};

use config::AdminConfig;

const HELP: &str = "\
Run Swiss-system tournament operations

USAGE:
  st_admin [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  register <NAME>          Register a player and print the assigned id
  report <WINNER> <LOSER>  Record a match result by player id
  count                    Print the number of registered players
  players                  List registered players
  standings                Print current standings, most wins first
  pairings                 Print pairings for the next round
  reset-matches            Delete every match
  reset-players            Delete every player and their matches
  migrate                  Create or update the database schema

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --json                   Print results as JSON

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Maximum pool size
  RUST_LOG                 Log filter (e.g. info, debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let json = pargs.contains("--json");
    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let Some(command) = pargs.subcommand()? else {
        print!("{HELP}");
        bail!("missing command");
    };

    env_logger::builder().format_target(false).init();

    let config = AdminConfig::from_env(database_url, json);
    config.validate()?;

    debug!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;

    let tournament = TournamentManager::new(Arc::new(db.repository()));
    let mut stdout = std::io::stdout().lock();
    let result = run(
        &command,
        pargs,
        &tournament,
        Some(&db),
        config.json,
        &mut stdout,
    )
    .await;
    db.close().await;
    result
}

/// Execute one subcommand against the tournament and write its output.
///
/// `db` is only needed for `migrate`; every other command goes through the
/// manager and so works with any store.
async fn run(
    command: &str,
    mut pargs: Arguments,
    tournament: &TournamentManager,
    db: Option<&Database>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match command {
        "register" => {
            let name = join_free_args(pargs.finish());
            let id = tournament
                .register_player(&name)
                .await
                .map_err(client_error)?;
            if json {
                writeln!(out, "{}", serde_json::json!({ "id": id }))?;
            } else {
                writeln!(out, "{id}")?;
            }
        }
        "report" => {
            let winner: PlayerId = pargs.free_from_str().context("expected <WINNER> id")?;
            let loser: PlayerId = pargs.free_from_str().context("expected <LOSER> id")?;
            reject_extra(pargs)?;
            tournament
                .report_match(winner, loser)
                .await
                .map_err(client_error)?;
        }
        "count" => {
            reject_extra(pargs)?;
            let count = tournament.count_players().await.map_err(client_error)?;
            if json {
                writeln!(out, "{}", serde_json::json!({ "count": count }))?;
            } else {
                writeln!(out, "{count}")?;
            }
        }
        "players" => {
            reject_extra(pargs)?;
            let players = tournament.players().await.map_err(client_error)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&players)?)?;
            } else {
                for player in players {
                    writeln!(out, "{:>6}  {}", player.id, player.name)?;
                }
            }
        }
        "standings" => {
            reject_extra(pargs)?;
            let standings = tournament.player_standings().await.map_err(client_error)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&standings)?)?;
            } else {
                print_standings(out, &standings)?;
            }
        }
        "pairings" => {
            reject_extra(pargs)?;
            let pairings = tournament.swiss_pairings().await.map_err(client_error)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&pairings)?)?;
            } else {
                print_pairings(out, &pairings)?;
            }
        }
        "reset-matches" => {
            reject_extra(pargs)?;
            tournament.delete_matches().await.map_err(client_error)?;
        }
        "reset-players" => {
            reject_extra(pargs)?;
            tournament.delete_players().await.map_err(client_error)?;
        }
        "migrate" => {
            reject_extra(pargs)?;
            let Some(db) = db else {
                bail!("migrate requires a database connection");
            };
            db.migrate().await.map_err(client_error)?;
            info!("Migrations applied");
        }
        other => bail!("unknown command '{other}', see --help"),
    }

    Ok(())
}

/// Log the full error and surface only the client-safe message
fn client_error(e: TournamentError) -> Error {
    debug!("Tournament operation failed: {e}");
    anyhow::anyhow!(e.client_message())
}

fn join_free_args(args: Vec<OsString>) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn reject_extra(pargs: Arguments) -> Result<(), Error> {
    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {}", join_free_args(rest));
    }
    Ok(())
}

fn print_standings(out: &mut dyn Write, standings: &[StandingsRow]) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:>6}  {:<30}  {:>4}  {:>6}  {:>7}",
        "RANK", "ID", "NAME", "WINS", "LOSSES", "MATCHES"
    )?;
    for (rank, row) in standings.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:>6}  {:<30}  {:>4}  {:>6}  {:>7}",
            rank + 1,
            row.id,
            row.name,
            row.wins,
            row.losses(),
            row.matches
        )?;
    }
    Ok(())
}

fn print_pairings(out: &mut dyn Write, pairings: &[Pairing]) -> io::Result<()> {
    for pairing in pairings {
        match &pairing.second {
            Some(second) => writeln!(
                out,
                "{} ({}) vs {} ({})",
                pairing.first.name, pairing.first.id, second.name, second.id
            )?,
            None => writeln!(out, "{} ({}) has a bye", pairing.first.name, pairing.first.id)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiss_tournament::InMemoryRepository;

    fn manager() -> TournamentManager {
        TournamentManager::new(Arc::new(InMemoryRepository::new()))
    }

    fn args(items: &[&str]) -> Arguments {
        Arguments::from_vec(items.iter().map(OsString::from).collect())
    }

    async fn exec(
        tournament: &TournamentManager,
        command: &str,
        items: &[&str],
        json: bool,
    ) -> Result<String, Error> {
        let mut out = Vec::new();
        run(command, args(items), tournament, None, json, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_register_prints_assigned_id() {
        let tournament = manager();

        let out = exec(&tournament, "register", &["Twilight", "Sparkle"], false)
            .await
            .unwrap();
        assert_eq!(out, "1\n");

        let out = exec(&tournament, "register", &["Boots O'Neal"], true)
            .await
            .unwrap();
        assert_eq!(out.trim(), r#"{"id":2}"#);

        let players = tournament.players().await.unwrap();
        assert_eq!(players[0].name, "Twilight Sparkle");
        assert_eq!(players[1].name, "Boots O'Neal");
    }

    #[tokio::test]
    async fn test_register_without_name_is_rejected() {
        let tournament = manager();

        let err = exec(&tournament, "register", &[], false).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid player name"));
        assert_eq!(tournament.count_players().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_report_then_standings_and_pairings() {
        let tournament = manager();
        for name in ["Applejack", "Rarity", "Fluttershy"] {
            exec(&tournament, "register", &[name], false).await.unwrap();
        }

        let out = exec(&tournament, "report", &["2", "1"], false).await.unwrap();
        assert!(out.is_empty());

        let out = exec(&tournament, "standings", &[], false).await.unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("LOSSES"));
        let leader: Vec<_> = lines[1].split_whitespace().collect();
        assert_eq!(leader, ["1", "2", "Rarity", "1", "0", "1"]);
        let runner_up: Vec<_> = lines[2].split_whitespace().collect();
        assert_eq!(runner_up, ["2", "1", "Applejack", "0", "1", "1"]);

        let out = exec(&tournament, "pairings", &[], false).await.unwrap();
        assert_eq!(
            out,
            "Rarity (2) vs Applejack (1)\nFluttershy (3) has a bye\n"
        );
    }

    #[tokio::test]
    async fn test_report_rejects_bad_ids() {
        let tournament = manager();
        exec(&tournament, "register", &["Rarity"], false).await.unwrap();

        let err = exec(&tournament, "report", &["first", "1"], false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("<WINNER>"));

        let err = exec(&tournament, "report", &["1", "last"], false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("<LOSER>"));

        let err = exec(&tournament, "report", &["1"], false).await.unwrap_err();
        assert!(err.to_string().contains("<LOSER>"));

        let err = exec(&tournament, "report", &["1", "2", "3"], false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unexpected arguments"));

        let standings = tournament.player_standings().await.unwrap();
        assert_eq!(standings[0].matches, 0);
    }

    #[tokio::test]
    async fn test_count_and_resets() {
        let tournament = manager();
        exec(&tournament, "register", &["Rarity"], false).await.unwrap();
        exec(&tournament, "register", &["Spike"], false).await.unwrap();
        exec(&tournament, "report", &["1", "2"], false).await.unwrap();

        let out = exec(&tournament, "count", &[], true).await.unwrap();
        assert_eq!(out.trim(), r#"{"count":2}"#);

        exec(&tournament, "reset-matches", &[], false).await.unwrap();
        let standings = tournament.player_standings().await.unwrap();
        assert!(standings.iter().all(|r| r.matches == 0));

        exec(&tournament, "reset-players", &[], false).await.unwrap();
        let out = exec(&tournament, "count", &[], false).await.unwrap();
        assert_eq!(out, "0\n");
    }

    #[tokio::test]
    async fn test_unknown_command_is_rejected() {
        let tournament = manager();

        let err = exec(&tournament, "shuffle", &[], false).await.unwrap_err();
        assert!(err.to_string().contains("unknown command 'shuffle'"));
    }

    #[tokio::test]
    async fn test_migrate_needs_database() {
        let tournament = manager();

        let err = exec(&tournament, "migrate", &[], false).await.unwrap_err();
        assert!(err.to_string().contains("requires a database"));
    }

    #[test]
    fn test_client_error_hides_store_details() {
        let err = client_error(TournamentError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.to_string(), "Internal server error");

        let err = client_error(TournamentError::InvalidName("too long".to_string()));
        assert_eq!(err.to_string(), "Invalid player name: too long");
    }

    #[test]
    fn test_join_free_args() {
        let args = vec![OsString::from("Twilight"), OsString::from("Sparkle")];
        assert_eq!(join_free_args(args), "Twilight Sparkle");
        assert_eq!(join_free_args(Vec::new()), "");
    }

    #[test]
    fn test_reject_extra() {
        let empty = Arguments::from_vec(Vec::new());
        assert!(reject_extra(empty).is_ok());

        let extra = Arguments::from_vec(vec![OsString::from("surprise")]);
        let err = reject_extra(extra).unwrap_err();
        assert!(err.to_string().contains("surprise"));
    }
}
