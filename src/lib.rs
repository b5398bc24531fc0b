pub mod catalog;
pub mod cli;
pub mod report;
pub mod selection;
pub mod session;
pub mod source;
pub mod trace;
