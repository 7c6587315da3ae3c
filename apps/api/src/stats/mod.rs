// Per-style stat/indicator layout: static tables plus the row composer.

pub mod composer;
pub mod config;
pub mod handlers;
