//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  {root}/{course}/{year}/data.csv  (one file per selection pair)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  cartesian product → parse → union concat → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  Vec<Row>, first-seen column superset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  classify columns → apply specs → new Table
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
