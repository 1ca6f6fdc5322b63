//! Task dispatch
//!
//! Maps scheduler task names to the external task implementations. The
//! tasks themselves (dungeons, daily quests, rogue runs, ...) live behind
//! [`TaskExecutor`].

pub mod copilot;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use copilot::{Copilot, TaskExecutor};

/// Tasks the scheduler can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    Restart,
    Start,
    Stop,
    GotoMain,
    Dungeon,
    Weekly,
    DailyQuest,
    BattlePass,
    Assignment,
    DataUpdate,
    Freebies,
    Rogue,
    Ornament,
    Benchmark,
    Daemon,
    PlannerScan,
    RewardCollector,
}

impl Task {
    pub const ALL: [Task; 17] = [
        Task::Restart,
        Task::Start,
        Task::Stop,
        Task::GotoMain,
        Task::Dungeon,
        Task::Weekly,
        Task::DailyQuest,
        Task::BattlePass,
        Task::Assignment,
        Task::DataUpdate,
        Task::Freebies,
        Task::Rogue,
        Task::Ornament,
        Task::Benchmark,
        Task::Daemon,
        Task::PlannerScan,
        Task::RewardCollector,
    ];

    /// Scheduler name, such as `DailyQuest`
    pub fn name(&self) -> &'static str {
        match self {
            Task::Restart => "Restart",
            Task::Start => "Start",
            Task::Stop => "Stop",
            Task::GotoMain => "GotoMain",
            Task::Dungeon => "Dungeon",
            Task::Weekly => "Weekly",
            Task::DailyQuest => "DailyQuest",
            Task::BattlePass => "BattlePass",
            Task::Assignment => "Assignment",
            Task::DataUpdate => "DataUpdate",
            Task::Freebies => "Freebies",
            Task::Rogue => "Rogue",
            Task::Ornament => "Ornament",
            Task::Benchmark => "Benchmark",
            Task::Daemon => "Daemon",
            Task::PlannerScan => "PlannerScan",
            Task::RewardCollector => "RewardCollector",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = TaskError;

    /// Accepts `DailyQuest` as well as `daily_quest`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| *c != '_').collect();
        Task::ALL
            .iter()
            .find(|task| task.name().eq_ignore_ascii_case(&key))
            .copied()
            .ok_or_else(|| TaskError::UnknownTask(s.to_string()))
    }
}

/// Task dispatch errors
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),
    #[error("Task {task} failed: {reason}")]
    Failed { task: Task, reason: String },
}
