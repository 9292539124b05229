//! `portal`: drives the authentication portal API from a terminal.
//!
//! The command line plays the presentation layer: every command builds a
//! fetch hook or the consent view model from `portal-core`, triggers it, and
//! prints the resulting state.

pub mod cli;
