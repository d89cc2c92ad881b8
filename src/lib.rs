pub mod config;
pub mod error;
pub mod joblist;
pub mod pipeline;
pub mod report;
pub mod task;
