//! Command handlers for the AgriGenius CLI.

pub mod ask;
pub mod greeting;
pub mod languages;
pub mod serve;

pub use ask::AskCommand;
pub use greeting::GreetingCommand;
pub use languages::LanguagesCommand;
pub use serve::ServeCommand;
