use clap::Subcommand;
use colored::Colorize;
use gigboard_lib::{
    Repository, Result,
    repository::{GigId, SingerId, Status},
};
use sysexits::ExitCode;

use crate::{paint, parse_status};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the status of every singer assigned to a gig
    Show { gig: u64 },
    /// Set the status of one singer for a gig
    Set {
        gig: u64,
        singer: u64,
        /// One of: Inquired, Available, "Not Available", Booked, Possible
        #[arg(value_parser = parse_status)]
        status: Status,
    },
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<ExitCode> {
    match cmd {
        Command::Show { gig } => {
            let gig = repo.gig(GigId(*gig))?;
            let assignments = gig.assignments()?;

            println!("{}", gig.name()?.bold());
            if assignments.is_empty() {
                println!("No singers assigned to this gig yet.");
            }
            for (singer, assignment) in assignments {
                println!(
                    "{:>4}  {:<24} {}",
                    singer.0,
                    assignment.name,
                    paint(assignment.status)
                );
            }
        }
        Command::Set {
            gig,
            singer,
            status,
        } => {
            repo.set_status(GigId(*gig), SingerId(*singer), *status)?;
            println!("Status updated.");
        }
    }

    Ok(ExitCode::Ok)
}
