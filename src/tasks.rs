//! The to-do list and the add/edit modal that feeds it.
//!
//! Mutations only change in-memory state and report whether anything changed;
//! persisting ([`crate::storage::save_tasks`]) and rendering are left to the
//! caller.

use log::debug;
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Insertion-ordered task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Creation timestamp `now_ms`, bumped past the largest existing id. When
    /// the largest id is already `u64::MAX`, the smallest free id is used.
    fn next_id(&self, now_ms: u64) -> TaskId {
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if now_ms <= max => max
                .checked_add(1)
                .unwrap_or_else(|| self.smallest_free_id()),
            _ => now_ms,
        }
    }

    fn smallest_free_id(&self) -> TaskId {
        let mut taken: Vec<TaskId> = self.tasks.iter().map(|t| t.id).collect();
        taken.sort_unstable();
        taken.dedup();
        taken
            .iter()
            .zip(0..)
            .find(|(id, candidate)| **id != *candidate)
            .map_or(taken.len() as TaskId, |(_, candidate)| candidate)
    }

    /// Append a task. Blank text is rejected.
    pub fn add(&mut self, text: &str, now_ms: u64) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id(now_ms);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        debug!("added task {}", id);
        Some(id)
    }

    /// Replace the text of `id`. Blank text or an unknown id is rejected.
    pub fn edit(&mut self, id: TaskId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove `id` if `confirm` approves it. `confirm` is not consulted for
    /// unknown ids.
    pub fn delete(&mut self, id: TaskId, confirm: impl FnOnce(&Task) -> bool) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        if !confirm(&self.tasks[pos]) {
            return None;
        }
        debug!("deleted task {}", id);
        Some(self.tasks.remove(pos))
    }
}

/// State of the add/edit task modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditor {
    open: bool,
    editing: Option<TaskId>,
    draft: String,
}

impl TaskEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn open_new(&mut self) {
        self.open = true;
        self.editing = None;
        self.draft.clear();
    }

    /// Open pre-filled with an existing task. Unknown ids are ignored.
    pub fn open_edit(&mut self, store: &TaskStore, id: TaskId) -> bool {
        let Some(task) = store.get(id) else {
            return false;
        };
        self.open = true;
        self.editing = Some(id);
        self.draft = task.text.clone();
        true
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.draft.clear();
    }

    /// Commit the draft. A blank draft leaves everything, including the open
    /// modal, untouched. Returns whether the store changed.
    pub fn save(&mut self, store: &mut TaskStore, now_ms: u64) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }
        let changed = match self.editing {
            Some(id) => store.edit(id, &self.draft),
            None => store.add(&self.draft, now_ms).is_some(),
        };
        self.close();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::encode_tasks;

    #[test]
    fn test_add_rejects_blank() {
        let mut store = TaskStore::new();
        assert_eq!(store.add("", 1), None);
        assert_eq!(store.add("   ", 2), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_appends_one_incomplete_task() {
        let mut store = TaskStore::new();
        let id = store.add("buy milk", 1_000).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.tasks()[0],
            Task {
                id,
                text: "buy milk".to_string(),
                completed: false
            }
        );
    }

    #[test]
    fn test_ids_unique_under_same_timestamp() {
        let mut store = TaskStore::new();
        let a = store.add("a", 500).unwrap();
        let b = store.add("b", 500).unwrap();
        let c = store.add("c", 10).unwrap();
        assert_eq!((a, b, c), (500, 501, 502));
        let texts: Vec<_> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_ids_stay_unique_after_max_stored_id() {
        let mut store = TaskStore::from_tasks(vec![
            Task {
                id: 0,
                text: "zero".to_string(),
                completed: false,
            },
            Task {
                id: u64::MAX,
                text: "last".to_string(),
                completed: true,
            },
        ]);
        let a = store.add("next", 1_700_000_000_000).unwrap();
        let b = store.add("after", 1_700_000_000_000).unwrap();
        assert_eq!((a, b), (1, 2));

        let mut ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_edit() {
        let mut store = TaskStore::new();
        let id = store.add("draft", 1).unwrap();
        assert!(!store.edit(id, "  "));
        assert!(!store.edit(id + 1, "other"));
        assert!(store.edit(id, "  final  "));
        assert_eq!(store.get(id).unwrap().text, "final");
    }

    #[test]
    fn test_toggle_unknown_id_leaves_list_identical() {
        let mut store = TaskStore::new();
        store.add("one", 1);
        store.add("two", 2);
        let before = encode_tasks(store.tasks()).unwrap();
        assert!(!store.toggle_complete(99));
        assert_eq!(encode_tasks(store.tasks()).unwrap(), before);
    }

    #[test]
    fn test_toggle_flips() {
        let mut store = TaskStore::new();
        let id = store.add("one", 1).unwrap();
        assert!(store.toggle_complete(id));
        assert!(store.get(id).unwrap().completed);
        assert!(store.toggle_complete(id));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = TaskStore::new();
        let id = store.add("one", 1).unwrap();
        store.add("two", 2);

        assert_eq!(store.delete(id, |_| false), None);
        assert_eq!(store.len(), 2);

        let mut asked = false;
        let missing = store.delete(42, |_| {
            asked = true;
            true
        });
        assert_eq!(missing, None);
        assert!(!asked);

        let removed = store.delete(id, |task| task.text == "one").unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(store.tasks()[0].text, "two");
    }

    #[test]
    fn test_editor_add_flow() {
        let mut store = TaskStore::new();
        let mut editor = TaskEditor::default();
        editor.open_new();
        assert!(editor.is_open());

        editor.set_draft("   ".to_string());
        assert!(!editor.save(&mut store, 1));
        assert!(editor.is_open());
        assert!(store.is_empty());

        editor.set_draft("write tests".to_string());
        assert!(editor.save(&mut store, 1));
        assert!(!editor.is_open());
        assert_eq!(editor.draft(), "");
        assert_eq!(store.tasks()[0].text, "write tests");
    }

    #[test]
    fn test_editor_edit_flow() {
        let mut store = TaskStore::new();
        let id = store.add("old", 1).unwrap();
        let mut editor = TaskEditor::default();

        assert!(!editor.open_edit(&store, id + 7));
        assert!(!editor.is_open());

        assert!(editor.open_edit(&store, id));
        assert_eq!(editor.draft(), "old");
        assert_eq!(editor.editing(), Some(id));

        editor.set_draft("new".to_string());
        assert!(editor.save(&mut store, 99));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().text, "new");
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn test_editor_cancel_discards_draft() {
        let mut store = TaskStore::new();
        let id = store.add("keep", 1).unwrap();
        let mut editor = TaskEditor::default();
        editor.open_edit(&store, id);
        editor.set_draft("changed".to_string());
        editor.close();
        assert_eq!(store.get(id).unwrap().text, "keep");
        editor.open_new();
        assert_eq!(editor.draft(), "");
    }
}
