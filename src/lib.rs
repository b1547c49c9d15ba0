//! Random Roll - launcher plugin for yes/no answers, number rolls and random picks

pub mod command;
pub mod core;
pub mod plugin;
