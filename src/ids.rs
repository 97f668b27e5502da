use crate::error::{PlannerError, PlannerResult};

/// Source of record identifiers. One source is shared by every record kind
/// on a board, so ids are unique across projects, tasks, exams and classes.
pub trait IdSource: Send + Sync {
    fn next_id(&mut self) -> PlannerResult<i32>;
}

/// Monotonic counter starting at 1. Once `i32::MAX` has been handed out the
/// sequence is exhausted and every later call fails.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: Option<i32>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i32) -> Self {
        Self { next: Some(first) }
    }

    pub fn peek(&self) -> Option<i32> {
        self.next
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> PlannerResult<i32> {
        let id = self.next.ok_or(PlannerError::IdsExhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}
