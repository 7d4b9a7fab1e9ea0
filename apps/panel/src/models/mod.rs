pub mod job;
pub mod resume;

pub use job::{JobEntry, JobField, ParsedJobs};
pub use resume::SavedResume;
