//! Hyakumeiten restaurant map: data model, filtering and viewport selection,
//! plus the UI state driving the egui front end.

pub mod color;
pub mod data;
pub mod state;
