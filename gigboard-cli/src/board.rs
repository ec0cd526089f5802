use clap::Subcommand;
use colored::Colorize;
use gigboard_lib::{
    Repository, Result,
    board::Board,
    repository::{Assignments, GigId, SingerId, Status},
};
use sysexits::ExitCode;

use crate::{paint, parse_status};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the board: one column per status
    Show { gig: u64 },
    /// Move a singer to another column and store the result
    Move {
        gig: u64,
        singer: u64,
        #[arg(value_parser = parse_status)]
        status: Status,
    },
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<ExitCode> {
    match cmd {
        Command::Show { gig } => {
            let assignments = repo.assignments(GigId(*gig))?;
            let board = Board::from_assignments(&assignments);
            if board.is_empty() {
                println!("No singers assigned to this gig yet.");
                return Ok(ExitCode::Ok);
            }

            print_board(&board, &assignments);
            println!("{} singers on the board.", board.len());
        }
        Command::Move {
            gig,
            singer,
            status,
        } => {
            let gig = GigId(*gig);
            let singer = SingerId(*singer);
            let mut board = repo.board(gig)?;

            if !board.move_singer(singer, *status) {
                eprintln!(
                    "{} singer {singer} has no status for gig {gig} yet",
                    "error:".red().bold()
                );
                return Ok(ExitCode::DataErr);
            }

            let changes = repo.apply_board(gig, &board)?;
            println!("Statuses updated ({} written).", changes.len());

            print_board(&board, &repo.assignments(gig)?);
        }
    }

    Ok(ExitCode::Ok)
}

fn print_board(board: &Board, assignments: &Assignments) {
    for column in board.columns() {
        println!(
            "{} ({})",
            paint(column.status()),
            column.singers().len()
        );
        for singer in column.singers() {
            let name = assignments
                .get(singer)
                .map(|a| a.name.as_str())
                .unwrap_or("<unknown>");
            println!("  {:>4}  {name}", singer.0);
        }
    }
}
