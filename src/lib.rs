pub mod catalog;
pub mod commands;
pub mod project;
pub mod runtime;
pub mod service;
