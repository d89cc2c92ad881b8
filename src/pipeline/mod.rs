pub mod collector;
pub mod dispatcher;
pub mod runner;
