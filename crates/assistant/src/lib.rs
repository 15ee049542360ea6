pub mod cli;
pub mod prompts;
pub mod runtime;
pub mod session;
