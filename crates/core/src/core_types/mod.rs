//! Core types and utilities

pub mod cell;

pub use cell::CellState;
