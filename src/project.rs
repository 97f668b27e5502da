use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_COLOR: &str = "#ff6b6b";

/// A named bucket that tasks point at by name. Subjects in the study
/// planner are projects too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl Project {
    pub fn new(id: i32, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }
}
