use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use gigboard_lib::{Repository, Result};
use sysexits::ExitCode;

use crate::parse_gig_date;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List gigs
    List,
    /// Create a new gig
    Add {
        #[arg(long)]
        client: String,
        #[arg(long)]
        name: String,
        /// Date of the gig, as YYYY-MM-DD
        #[arg(long, value_parser = parse_gig_date)]
        date: NaiveDate,
        #[arg(long)]
        venue: String,
    },
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<ExitCode> {
    match cmd {
        Command::List => {
            let gigs = repo.gigs()?;
            if gigs.is_empty() {
                println!("No gigs created yet.");
            }
            for gig in gigs {
                println!(
                    "{}  {}  {}  {} @ {}",
                    format!("{:>4}", gig.id().0).bold(),
                    gig.date()?,
                    gig.name()?,
                    gig.client_name()?,
                    gig.venue()?
                );
            }
        }
        Command::Add {
            client,
            name,
            date,
            venue,
        } => {
            let gig = repo.create_gig(client, name, *date, venue)?;
            println!("Gig created with id {}.", gig.id());
        }
    }

    Ok(ExitCode::Ok)
}
