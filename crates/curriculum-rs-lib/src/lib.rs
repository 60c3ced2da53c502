pub mod error;
pub use error::Result;
pub use error::Error;

pub mod course;
pub use course::{Course, CourseId, CourseStates, DisplayState};

pub mod config;
pub use config::Config;

pub mod registry;
pub use registry::Registry;

pub mod approval;
pub use approval::ApprovalStore;

pub mod resolver;
pub mod cascade;

pub mod gateway;
pub use gateway::Gateway;

pub mod persistence;
pub mod curriculum;
pub use curriculum::CurriculumFile;
