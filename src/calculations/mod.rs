pub mod study_plan;

pub use study_plan::{StudyPlanOutput, StudyPlanPass};
