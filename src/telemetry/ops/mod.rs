pub mod generate;
pub mod service;
pub mod shell;
