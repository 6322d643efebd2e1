pub mod workflow;

pub use workflow::execute_note_workflow;
