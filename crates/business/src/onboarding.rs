use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Practice tasks offered to a new operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingTask {
    ViewItems,
    AddItem,
    LogUsage,
    CheckAlerts,
    ViewReports,
}

impl OnboardingTask {
    pub const ALL: [OnboardingTask; 5] = [
        OnboardingTask::ViewItems,
        OnboardingTask::AddItem,
        OnboardingTask::LogUsage,
        OnboardingTask::CheckAlerts,
        OnboardingTask::ViewReports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingTask::ViewItems => "View sample inventory items",
            OnboardingTask::AddItem => "Add your first item",
            OnboardingTask::LogUsage => "Log a usage entry",
            OnboardingTask::CheckAlerts => "Check low stock alerts",
            OnboardingTask::ViewReports => "View the reports screen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Onboarding {
    completed: BTreeSet<OnboardingTask>,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a task done. Returns false if it already was.
    pub fn complete(&mut self, task: OnboardingTask) -> bool {
        self.completed.insert(task)
    }

    pub fn is_done(&self, task: OnboardingTask) -> bool {
        self.completed.contains(&task)
    }

    pub fn remaining(&self) -> Vec<OnboardingTask> {
        OnboardingTask::ALL
            .into_iter()
            .filter(|t| !self.completed.contains(t))
            .collect()
    }

    pub fn progress(&self) -> f64 {
        self.completed.len() as f64 / OnboardingTask::ALL.len() as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() == OnboardingTask::ALL.len()
    }
}
