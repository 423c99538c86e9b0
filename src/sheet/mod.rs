//! Row Source
//!
//! Fetches tabular rows from a public spreadsheet-to-JSON endpoint
//! (opensheet-style): a single GET to `{base}/{spreadsheet_id}/{tab}`
//! returns the whole tab as a JSON array of objects keyed by column header.
//!
//! The endpoint is treated as an opaque collaborator: no auth, no request
//! parameters, no server-side pagination. A failed fetch is a typed error
//! for the caller to log; the rest of the system keeps running with empty
//! data.

mod client;
mod row;

pub use client::{SheetClient, SheetConfig, SheetError};
pub use row::{Row, UNSPECIFIED_LABEL};
