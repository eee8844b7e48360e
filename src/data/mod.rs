//! Data layer: core types, loading, and the two read-only queries.
//!
//! Architecture:
//! ```text
//!  restaurants.json / .csv      categories.json
//!        │                            │
//!        ▼                            ▼
//!   ┌──────────┐               ┌──────────┐
//!   │  loader   │  parse+clean  │  loader   │
//!   └──────────┘               └──────────┘
//!        │                            │
//!        ▼                            │
//!   ┌───────────────────┐             │
//!   │ RestaurantDataset  │◄────────────┘  Arc<[Restaurant]>, stats
//!   └───────────────────┘
//!        │                 │
//!        ▼                 ▼
//!   ┌──────────┐     ┌──────────┐
//!   │  filter   │     │ viewport │  predicates → matching restaurants
//!   └──────────┘     └──────────┘
//! ```

pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod viewport;
