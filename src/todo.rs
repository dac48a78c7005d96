//! Scratch to-do list shown next to the calendar. It shares no data with the
//! calendar and lives only as long as the widget.

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        TodoList::default()
    }

    pub fn add(&mut self, text: &str) -> Result<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::new(ErrorKind::Validation, "add a task"));
        }

        self.items.push(TodoItem {
            id: Uuid::new_v4(),
            text: text.to_owned(),
            created_at: Local::now(),
        });

        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the item at `index` (0-based).
    pub fn remove(&mut self, index: usize) -> Option<TodoItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_keeps_order() {
        let mut list = TodoList::new();
        list.add("  buy milk ").unwrap();
        list.add("call mom").unwrap();

        let texts: Vec<_> = list.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["buy milk", "call mom"]);
    }

    #[test]
    fn blank_task_is_rejected() {
        let mut list = TodoList::new();
        let err = list.add("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(list.is_empty());
    }

    #[test]
    fn remove_by_index() {
        let mut list = TodoList::new();
        let first = list.add("a").unwrap().id;
        list.add("b").unwrap();
        list.add("c").unwrap();

        assert_eq!(list.remove(1).map(|i| i.text), Some("b".to_owned()));
        assert!(list.remove(5).is_none());
        assert_eq!(list.items()[0].id, first);
        assert_eq!(list.items().len(), 2);
    }
}
