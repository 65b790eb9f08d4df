mod commands;
mod runtime;
mod worker;

pub(crate) use commands::FetchCommand;
pub use runtime::FetchRuntime;
pub(crate) use worker::spawn;
