//! Trip log for taxi drivers: a flat CSV table of trips plus daily, monthly, yearly and
//! cumulative fare statistics over it.

pub mod aggregate;
pub mod common;
pub mod config;
pub mod controller;
mod parser;
pub mod store;
pub mod trip;
mod util;
