//! esctl: tables over search cluster admin API output
//!
//! Layers, innermost first: [`domain`] (column types, natural ordering,
//! selection, sorting), [`application`] (filters, rendering, services),
//! [`infrastructure`] (data sources, wiring) and [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
