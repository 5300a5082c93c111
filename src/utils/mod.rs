//! Small helpers shared by the reports and executors

pub mod string;
