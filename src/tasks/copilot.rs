//! Scheduler entry points

use super::{Task, TaskError};
use crate::config::Settings;

/// Device and task implementations the dispatcher drives
pub trait TaskExecutor {
    /// Launch the game client
    fn app_start(&mut self) -> Result<(), TaskError>;
    /// Close the game client
    fn app_stop(&mut self) -> Result<(), TaskError>;
    /// Close and relaunch the game client
    fn app_restart(&mut self) -> Result<(), TaskError>;
    /// Whether the game client is in the foreground
    fn app_is_running(&mut self) -> bool;
    /// Navigate back to the main page
    fn ui_goto_main(&mut self) -> Result<(), TaskError>;
    /// Run a gameplay task to completion
    fn run_task(&mut self, task: Task) -> Result<(), TaskError>;
}

/// Dispatches scheduler tasks to an executor
pub struct Copilot<E: TaskExecutor> {
    executor: E,
    is_cloud_game: bool,
}

impl<E: TaskExecutor> Copilot<E> {
    pub fn new(executor: E, settings: &Settings) -> Self {
        Self {
            executor,
            is_cloud_game: settings.is_cloud_game,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run a task by scheduler name
    pub fn run_by_name(&mut self, name: &str) -> Result<(), TaskError> {
        let task = name.parse()?;
        self.run(task)
    }

    /// Run a single task
    pub fn run(&mut self, task: Task) -> Result<(), TaskError> {
        log::info!("Run task: {task}");
        match task {
            Task::Restart => self.executor.app_restart(),
            Task::Start => self.executor.app_start(),
            Task::Stop => self.executor.app_stop(),
            Task::GotoMain => self.goto_main(),
            task => self.executor.run_task(task),
        }
    }

    fn goto_main(&mut self) -> Result<(), TaskError> {
        if self.executor.app_is_running() {
            log::info!("App is already running, goto main page");
        } else {
            log::info!("App is not running, start app and goto main page");
            self.executor.app_start()?;
        }
        self.executor.ui_goto_main()
    }

    /// Clean up after a task failed
    ///
    /// Cloud clients are stopped to avoid idle billing.
    pub fn error_postprocess(&mut self) -> Result<(), TaskError> {
        if self.is_cloud_game {
            log::warn!("Stopping cloud game after error");
            self.executor.app_stop()?;
        }
        Ok(())
    }
}
