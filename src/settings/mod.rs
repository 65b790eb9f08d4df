//! Configuration loading and resolution.
//!
//! `load` layers config files, environment variables and CLI flags, then
//! returns a [`ResolvedConfig`] with every default filled in.

mod loader;
mod raw;
mod resolved;
mod sources;

#[cfg(test)]
mod tests;

pub use loader::load;
pub use resolved::ResolvedConfig;
