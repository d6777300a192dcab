pub mod fetch_task;
pub mod process_task;
