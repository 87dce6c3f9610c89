//! Nagios-style probe asserting a CouchDB database exists
//!
//! One run issues a single `GET /_all_dbs`, then either prints the database
//! list or reports whether the requested database is in it.

pub mod check;
pub mod cli;
pub mod couchdb;
pub mod error;
pub mod status;
pub mod telemetry;
pub mod tls;
