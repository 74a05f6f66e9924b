mod apply;
mod cli;
mod config;
mod constants;
mod entity;
mod errors;
mod fstab;
mod inspect;
mod linux;
mod logging;
mod planner;
mod run;
mod sanity;
mod utils;
mod validation;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    logging::init(args.verbose);

    match run::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} [{:?}] {err}", "error:".red().bold(), err.kind());

            if err.may_have_modified_disk() {
                eprintln!("{}", "WARN: the disk may have been partially modified".yellow());
            }

            if let errors::SplitError::ApplyError {
                action_failed,
                actions_performed,
                ..
            } = &err
            {
                eprintln!("{} {action_failed:?}", "failed action:".red());
                eprintln!("actions performed:");
                for action in actions_performed {
                    eprintln!("  {action:?}");
                }
            }

            ExitCode::FAILURE
        }
    }
}
