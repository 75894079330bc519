//! External integrations
//!
//! Narrow adapter boundaries around the pipeline's collaborators: the xlsx
//! extract reader, the xlsx report writer, and the SMTP submission client.

pub mod extract;
pub mod mail;
pub mod spreadsheet;
