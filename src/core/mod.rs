// Core modules implementing facet resolution, platform rules, and error modeling.
pub mod config;
pub mod error;
pub mod interpreter;
pub mod platform;
pub mod probe;
pub mod resolver;
