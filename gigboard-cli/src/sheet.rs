use colored::Colorize;
use gigboard_lib::{
    Repository, Result,
    repository::{GigId, SingerId, Status},
    sheet,
};
use sysexits::ExitCode;

use crate::{paint, parse_singer_status};

#[derive(clap::Args, Debug, Clone)]
pub struct Args {
    gig: u64,
    /// Change a singer's row before showing it, as <singer-id>=<status>
    #[arg(long, value_parser = parse_singer_status)]
    pub set: Vec<(SingerId, Status)>,
    /// Store every row of the sheet
    #[arg(long)]
    pub apply: bool,
}

pub fn handle(repo: &Repository, args: &Args) -> Result<ExitCode> {
    let gig = GigId(args.gig);
    let mut rows = repo.status_sheet(gig)?;

    if rows.is_empty() {
        println!("Add singers first.");
        return Ok(ExitCode::Ok);
    }

    for &(singer, status) in &args.set {
        if !sheet::set(&mut rows, singer, status) {
            eprintln!("{} no singer with id {singer}", "error:".red().bold());
            return Ok(ExitCode::DataErr);
        }
    }

    for row in &rows {
        let marker = if row.stored { " " } else { "*" };
        println!(
            "{:>4}{marker} {:<24} {}",
            row.singer.0,
            row.name,
            paint(row.status)
        );
    }

    if args.apply {
        repo.apply_sheet(gig, &rows)?;
        println!("Statuses updated.");
    } else {
        println!("{}", "* not stored yet; pass --apply to store the sheet".dimmed());
    }

    Ok(ExitCode::Ok)
}
