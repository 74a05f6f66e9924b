use std::time::Instant;

use crate::apply::{
    self,
    Executor,
};
use crate::config::Config;
use crate::entity::plan::Plan;
use crate::entity::report::Report;
use crate::errors::SplitError;
use crate::inspect::{
    self,
    DeviceInspector,
};
use crate::planner;
use crate::utils::shell::Runner;
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Planning,
    AwaitingConfirmation,
    Executing,
    Done,
    ReportOnly,
    Aborted,
}

#[derive(Debug)]
pub enum Outcome {
    /// Plan was applied to the disk
    Done(Report),

    /// Dry run, the disk was not touched
    ReportOnly(Report),

    /// Operator did not confirm, the disk was not touched
    Declined(Plan),
}

/// One invocation against one disk
pub struct Session<'a> {
    config: &'a Config,
    inspector: &'a dyn DeviceInspector,
    runner: &'a dyn Runner,
    executor: &'a dyn Executor,
    history: Vec<Stage>,
}

impl<'a> Session<'a> {
    pub fn new(
        config: &'a Config,
        inspector: &'a dyn DeviceInspector,
        runner: &'a dyn Runner,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            config,
            inspector,
            runner,
            executor,
            history: vec![Stage::Validating],
        }
    }

    pub fn stage(&self) -> Stage {
        // history is never empty
        self.history.last().copied().unwrap_or(Stage::Validating)
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Drives the session to completion. `confirm` is asked once
    /// before anything is written, unless the config assumes yes.
    pub fn run(
        &mut self,
        confirm: &mut dyn FnMut(&Plan) -> Result<bool, SplitError>,
    ) -> Result<Outcome, SplitError> {
        let result = self.advance(confirm);

        if let Err(err) = &result {
            log::error!("aborted while {:?}: {err}", self.stage());
            self.enter(Stage::Aborted);
        }

        result
    }

    fn advance(
        &mut self,
        confirm: &mut dyn FnMut(&Plan) -> Result<bool, SplitError>,
    ) -> Result<Outcome, SplitError> {
        let start = Instant::now();
        let config = self.config;
        let disk = &config.disk;

        validation::validate(disk, self.inspector)?;

        self.enter(Stage::Planning);
        let geometry = inspect::read_geometry(self.inspector, disk)?;
        let plan = planner::build(config, geometry)?;

        if config.dry_run {
            self.enter(Stage::ReportOnly);

            return Ok(Outcome::ReportOnly(Report {
                dry_run: true,
                plan,
                actions: vec![],
                partitions: vec![],
                snippet: None,
                duration: start.elapsed(),
            }));
        }

        self.enter(Stage::AwaitingConfirmation);
        if !config.assume_yes && !confirm(&plan)? {
            log::warn!("operator declined, {disk} was not modified");
            self.enter(Stage::Aborted);

            return Ok(Outcome::Declined(plan));
        }

        self.enter(Stage::Executing);
        let applied = apply::apply_plan(
            &plan,
            config,
            self.executor,
            self.runner,
            self.inspector,
        )?;

        self.enter(Stage::Done);

        Ok(Outcome::Done(Report {
            dry_run: false,
            plan,
            actions: applied.actions,
            partitions: applied.partitions,
            snippet: Some(applied.snippet.display().to_string()),
            duration: start.elapsed(),
        }))
    }

    fn enter(&mut self, stage: Stage) {
        log::info!("session: {:?} -> {stage:?}", self.stage());
        self.history.push(stage);
    }
}
