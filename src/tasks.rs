use serde::Serialize;
use tracing::debug;

use crate::engine::compute_reduction;
use crate::types::EcoTask;

/// The eco-task catalog with per-task completion flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBoard {
    tasks: Vec<EcoTask>,
}

impl TaskBoard {
    /// Every task starts incomplete, whatever the catalog says.
    pub fn new(catalog: &[EcoTask]) -> Self {
        let tasks = catalog
            .iter()
            .cloned()
            .map(|mut t| {
                t.completed = false;
                t
            })
            .collect();
        Self { tasks }
    }

    pub fn tasks(&self) -> &[EcoTask] {
        &self.tasks
    }

    /// Flip a task and return its new state; `None` for an unknown id.
    pub fn toggle(&mut self, id: u32) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        debug!(id, completed = task.completed, "eco-task toggled");
        Some(task.completed)
    }

    pub fn set_completed(&mut self, id: u32, completed: bool) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = completed;
        Some(completed)
    }

    pub fn reset(&mut self) {
        self.tasks.iter_mut().for_each(|t| t.completed = false);
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// kg CO2 credited by completed tasks.
    pub fn reduction(&self) -> f64 {
        compute_reduction(&self.tasks)
    }
}
