use clap::Subcommand;
use colored::Colorize;
use gigboard_lib::{Repository, Result};
use sysexits::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List singers
    List,
    /// Add a new singer
    Add {
        first_name: String,
        last_name: String,
        email: String,
    },
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<ExitCode> {
    match cmd {
        Command::List => {
            let singers = repo.singers()?;
            if singers.is_empty() {
                println!("No singers added yet.");
            }
            for singer in singers {
                println!(
                    "{}  {}  <{}>",
                    format!("{:>4}", singer.id().0).bold(),
                    singer.full_name()?,
                    singer.email()?
                );
            }
        }
        Command::Add {
            first_name,
            last_name,
            email,
        } => {
            let singer = repo.add_singer(first_name, last_name, email)?;
            println!("Singer added with id {}.", singer.id());
        }
    }

    Ok(ExitCode::Ok)
}
