mod prompt;
mod session;

use std::env;

use colored::Colorize;

use crate::cli;
use crate::config::{
    Config,
    Profile,
};
use crate::constants;
use crate::errors::SplitError;
use crate::linux::{
    self,
    LinuxInspector,
};
use crate::sanity;
use crate::utils::shell::ShellRunner;

use self::session::{
    Outcome,
    Session,
};

pub fn run(cli_args: cli::Cli) -> Result<(), SplitError> {
    let profile = match &cli_args.profile {
        Some(file) => Profile::from_file(file)?,
        None => Profile::default(),
    };

    let config = Config::new(&cli_args, profile, env::var(constants::ENV_SNIPPET_DIR).ok())?;

    if !linux::user::is_root() {
        println!("{}", "WARN: running as non-root user".yellow())
    }

    sanity::check(&config)?;

    let runner = ShellRunner;
    let inspector = LinuxInspector::new(&runner);
    let executor = config.backend.executor();

    let mut session = Session::new(&config, &inspector, &runner, executor.as_ref());
    match session.run(&mut prompt::confirm)? {
        Outcome::Done(report) => println!("{}", report.to_json_string()),
        Outcome::ReportOnly(report) => {
            println!("{}", report.plan.table());
            println!("{}", report.to_json_string());
        }
        Outcome::Declined(plan) => {
            println!("{}", format!("{} was left untouched", plan.disk).yellow())
        }
    }

    Ok(())
}
