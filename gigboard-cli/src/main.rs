use std::{
    path::{Path, PathBuf},
    process,
};

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use gigboard_lib::{
    Error, Repository, Result, fs::state_dir,
    repository::{SingerId, Status, entities, parse_date},
};
use sysexits::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod board;
mod gig;
mod sheet;
mod singer;
mod status;

#[derive(Parser, Debug)]
#[command(name = "gigboard")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on gigs
    #[command(subcommand)]
    Gig(gig::Command),
    /// Operate on singers
    #[command(subcommand)]
    Singer(singer::Command),
    /// Show or set the status of singers for a gig
    #[command(subcommand)]
    Status(status::Command),
    /// Show every singer's status for a gig, optionally changing and storing it
    Sheet(sheet::Args),
    /// Work with the status board of a gig
    #[command(subcommand)]
    Board(board::Command),
    /// Copy the database to a timestamped backup file
    Backup {
        /// Where to write the backup, defaults to the state directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> process::ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {err}");
    }

    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            exit_code(&err)
        }
    };

    code.into()
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let repo = Repository::open(cli.db.as_deref())?;

    match &cli.command {
        Command::Gig(cmd) => gig::handle(&repo, cmd),
        Command::Singer(cmd) => singer::handle(&repo, cmd),
        Command::Status(cmd) => status::handle(&repo, cmd),
        Command::Sheet(args) => sheet::handle(&repo, args),
        Command::Board(cmd) => board::handle(&repo, cmd),
        Command::Backup { out } => backup(&repo, out.as_deref()),
    }
}

fn backup(repo: &Repository, out: Option<&Path>) -> Result<ExitCode> {
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = Local::now().format("%Y%m%d-%H%M%S");
            state_dir()?.join(format!("gigboard-{timestamp}.db.bak"))
        }
    };

    repo.backup(&path)?;
    println!("Backed up database to {}", path.display());

    Ok(ExitCode::Ok)
}

fn exit_code(err: &Error) -> ExitCode {
    use entities::Error::*;

    match err {
        Error::Entity(StorageUnavailable(_)) | Error::Io(_) => ExitCode::IoErr,
        Error::Entity(Corrupt { .. } | UnsupportedModelVersion { .. } | RemovedEntity) => {
            ExitCode::Software
        }
        Error::Entity(_) => ExitCode::DataErr,
        Error::Config(_) => ExitCode::Config,
        Error::InvalidPath(_) => ExitCode::Usage,
    }
}

pub(crate) fn parse_status(label: &str) -> std::result::Result<Status, String> {
    Status::from_label(label).map_err(|err| err.to_string())
}

pub(crate) fn parse_gig_date(value: &str) -> std::result::Result<chrono::NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}

/// Parses `<singer-id>=<status>`, e.g. `3=Not Available`.
pub(crate) fn parse_singer_status(
    value: &str,
) -> std::result::Result<(SingerId, Status), String> {
    let (id, label) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <singer-id>=<status>, got '{value}'"))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|err| format!("invalid singer id '{id}': {err}"))?;

    Ok((SingerId(id), parse_status(label.trim())?))
}

/// Colour a status label the same way everywhere it is printed.
pub(crate) fn paint(status: Status) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        Status::Inquired => label.normal(),
        Status::Available => label.cyan(),
        Status::NotAvailable => label.red(),
        Status::Booked => label.green().bold(),
        Status::Possible => label.yellow(),
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use gigboard_lib::repository::GigId;

    use super::*;

    #[test]
    fn test_parse_status_set() {
        let cli =
            Cli::try_parse_from(["gigboard", "status", "set", "1", "2", "Not Available"]).unwrap();

        match cli.command {
            Command::Status(status::Command::Set {
                gig,
                singer,
                status,
            }) => {
                assert_eq!((gig, singer, status), (1, 2, Status::NotAvailable));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["gigboard", "status", "set", "1", "2", "Maybe"]).is_err());
    }

    #[test]
    fn test_parse_gig_add() {
        let cli = Cli::try_parse_from([
            "gigboard",
            "--db",
            "/tmp/test.db",
            "gig",
            "add",
            "--client",
            "Acme",
            "--name",
            "Summer Fest",
            "--date",
            "2025-06-01",
            "--venue",
            "Park",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/test.db")));
        assert!(matches!(cli.command, Command::Gig(gig::Command::Add { .. })));
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(
            Cli::try_parse_from([
                "gigboard", "gig", "add", "--client", "Acme", "--name", "Fest", "--date",
                "June 1st", "--venue", "Park",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_singer_status() {
        assert_eq!(
            parse_singer_status("3=Not Available").unwrap(),
            (SingerId(3), Status::NotAvailable)
        );
        assert_eq!(
            parse_singer_status(" 4 = Booked ").unwrap(),
            (SingerId(4), Status::Booked)
        );
        assert!(parse_singer_status("3").is_err());
        assert!(parse_singer_status("x=Booked").is_err());
        assert!(parse_singer_status("3=Sure").is_err());
    }

    #[test]
    fn test_parse_sheet_overrides() {
        let cli = Cli::try_parse_from([
            "gigboard", "sheet", "1", "--set", "2=Booked", "--set", "3=Possible", "--apply",
        ])
        .unwrap();

        match cli.command {
            Command::Sheet(args) => {
                assert!(args.apply);
                assert_eq!(
                    args.set,
                    vec![(SingerId(2), Status::Booked), (SingerId(3), Status::Possible)]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_exit_codes() {
        let invalid: Error = entities::Error::InvalidStatus("x".into()).into();
        let unknown: Error = entities::Error::UnknownGig(GigId(1)).into();

        assert_eq!(exit_code(&invalid), ExitCode::DataErr);
        assert_eq!(exit_code(&unknown), ExitCode::DataErr);
    }
}
