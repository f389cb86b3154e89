//! Per-session workspace for user-created records.
//!
//! One interactive session owns one `Session`: the saved-item set plus the
//! task, report, and assignment lists created from feed items. Single
//! writer, single reader, discarded on drop; nothing here is persisted or
//! reloaded. Every create validates the referenced feed item against the
//! atlas first, so a dangling intelligence id is a `NotFound` before any
//! list is touched.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::atlas::Atlas;
use crate::collection::toggle_membership;
use crate::error::DataError;
use crate::types::{
    Assignment, AssignmentStatus, ReportEntry, Task, TaskStatus,
};

/// Days until a task created from a feed action falls due.
const TASK_DUE_DAYS: i64 = 7;

/// Rollup of session activity for the dashboard footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCounts {
    pub saved_items: usize,
    pub tasks: usize,
    pub open_tasks: usize,
    pub report_entries: usize,
    pub assignments: usize,
}

/// Ephemeral, caller-owned session state.
#[derive(Debug, Default)]
pub struct Session {
    saved: BTreeSet<u32>,
    tasks: Vec<Task>,
    reports: Vec<ReportEntry>,
    assignments: Vec<Assignment>,
    last_id: i64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record ids are creation timestamps (epoch millis). Two creates in
    /// the same millisecond still get distinct ids: the second bumps past
    /// the first.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    // -------------------------------------------------------------------------
    // Saved items (bookmarks)
    // -------------------------------------------------------------------------

    /// Toggle a feed item in the saved set. Returns whether the item is
    /// saved after the toggle.
    pub fn toggle_saved(&mut self, atlas: &Atlas, intelligence_id: u32) -> Result<bool, DataError> {
        atlas.intelligence().get(&intelligence_id)?;
        self.saved = toggle_membership(&self.saved, intelligence_id);
        Ok(self.saved.contains(&intelligence_id))
    }

    pub fn is_saved(&self, intelligence_id: u32) -> bool {
        self.saved.contains(&intelligence_id)
    }

    pub fn saved(&self) -> &BTreeSet<u32> {
        &self.saved
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    /// Create a follow-up task from one action item of a feed entry.
    /// Priority mirrors the item's impact; due date is one week out.
    pub fn create_task(
        &mut self,
        atlas: &Atlas,
        intelligence_id: u32,
        action_item: &str,
    ) -> Result<&Task, DataError> {
        let item = atlas.intelligence().get(&intelligence_id)?;
        let created_at = Utc::now();
        let task = Task {
            id: self.next_id(),
            intelligence_id,
            title: action_item.to_string(),
            source_title: item.title.clone(),
            priority: item.impact,
            status: TaskStatus::Pending,
            created_at,
            due_date: (created_at + Duration::days(TASK_DUE_DAYS))
                .format("%Y-%m-%d")
                .to_string(),
        };
        log::debug!("task {} created from feed item {}", task.id, intelligence_id);
        self.tasks.push(task);
        Ok(self.tasks.last().expect("just pushed"))
    }

    /// Mark a task completed. Unknown task ids are `NotFound`.
    pub fn complete_task(&mut self, task_id: i64) -> Result<(), DataError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| DataError::not_found("tasks", task_id))?;
        task.status = TaskStatus::Completed;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // -------------------------------------------------------------------------
    // Report entries
    // -------------------------------------------------------------------------

    /// Capture a feed item into the session's report draft.
    pub fn add_to_report(
        &mut self,
        atlas: &Atlas,
        intelligence_id: u32,
    ) -> Result<&ReportEntry, DataError> {
        let item = atlas.intelligence().get(&intelligence_id)?;
        let entry = ReportEntry {
            id: self.next_id(),
            intelligence_id,
            title: item.title.clone(),
            category: item.category,
            impact: item.impact,
            summary: item.summary.clone(),
            source: item.source.clone(),
            source_url: item.source_url.clone(),
            added_at: Utc::now(),
        };
        self.reports.push(entry);
        Ok(self.reports.last().expect("just pushed"))
    }

    pub fn report_entries(&self) -> &[ReportEntry] {
        &self.reports
    }

    // -------------------------------------------------------------------------
    // Assignments
    // -------------------------------------------------------------------------

    /// Hand a feed item to a team, carrying its action list along.
    pub fn assign_team(
        &mut self,
        atlas: &Atlas,
        intelligence_id: u32,
        team: &str,
        members: Vec<String>,
    ) -> Result<&Assignment, DataError> {
        let item = atlas.intelligence().get(&intelligence_id)?;
        let assignment = Assignment {
            id: self.next_id(),
            intelligence_id,
            title: item.title.clone(),
            team: team.to_string(),
            members,
            action_items: item.action_items.clone(),
            assigned_at: Utc::now(),
            status: AssignmentStatus::Assigned,
        };
        self.assignments.push(assignment);
        Ok(self.assignments.last().expect("just pushed"))
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    // -------------------------------------------------------------------------
    // Rollups
    // -------------------------------------------------------------------------

    pub fn counts(&self) -> SessionCounts {
        SessionCounts {
            saved_items: self.saved.len(),
            tasks: self.tasks.len(),
            open_tasks: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count(),
            report_entries: self.reports.len(),
            assignments: self.assignments.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn atlas() -> Atlas {
        datasets::load_default_atlas().expect("default atlas loads")
    }

    #[test]
    fn test_toggle_saved_double_toggle_restores_original() {
        let atlas = atlas();
        let mut session = Session::new();
        let before = session.saved().clone();

        assert!(session.toggle_saved(&atlas, 1).unwrap());
        assert!(session.is_saved(1));
        assert!(!session.toggle_saved(&atlas, 1).unwrap());
        assert_eq!(session.saved(), &before);
    }

    #[test]
    fn test_toggle_saved_unknown_item_is_not_found() {
        let atlas = atlas();
        let mut session = Session::new();
        let err = session.toggle_saved(&atlas, 9999).unwrap_err();
        assert!(err.is_not_found());
        assert!(session.saved().is_empty());
    }

    #[test]
    fn test_create_task_copies_impact_and_sets_due_date() {
        let atlas = atlas();
        let mut session = Session::new();
        let item = atlas.intelligence().get(&1).unwrap().clone();

        let task = session
            .create_task(&atlas, 1, &item.action_items[0])
            .unwrap();
        assert_eq!(task.intelligence_id, 1);
        assert_eq!(task.priority, item.impact);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due_date.len(), 10); // YYYY-MM-DD
    }

    #[test]
    fn test_create_task_unknown_item_appends_nothing() {
        let atlas = atlas();
        let mut session = Session::new();
        assert!(session.create_task(&atlas, 9999, "x").unwrap_err().is_not_found());
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_rapid_creates_get_unique_ids() {
        let atlas = atlas();
        let mut session = Session::new();
        for _ in 0..50 {
            session.create_task(&atlas, 1, "follow up").unwrap();
        }
        let mut ids: Vec<i64> = session.tasks().iter().map(|t| t.id).collect();
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_complete_task_and_counts() {
        let atlas = atlas();
        let mut session = Session::new();
        let id = session.create_task(&atlas, 2, "monitor").unwrap().id;
        session.create_task(&atlas, 3, "review").unwrap();
        session.add_to_report(&atlas, 2).unwrap();
        session
            .assign_team(&atlas, 3, "Quality Team", vec!["A. Rivera".to_string()])
            .unwrap();
        session.toggle_saved(&atlas, 2).unwrap();

        session.complete_task(id).unwrap();
        let counts = session.counts();
        assert_eq!(counts.tasks, 2);
        assert_eq!(counts.open_tasks, 1);
        assert_eq!(counts.report_entries, 1);
        assert_eq!(counts.assignments, 1);
        assert_eq!(counts.saved_items, 1);

        assert!(session.complete_task(42).unwrap_err().is_not_found());
    }

    #[test]
    fn test_assignment_carries_action_items() {
        let atlas = atlas();
        let mut session = Session::new();
        let item = atlas.intelligence().get(&1).unwrap().clone();
        let assignment = session
            .assign_team(&atlas, 1, "Compliance Team", Vec::new())
            .unwrap();
        assert_eq!(assignment.action_items, item.action_items);
        assert_eq!(assignment.status, AssignmentStatus::Assigned);
    }
}
