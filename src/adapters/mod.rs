//! Concrete adapter implementations for ports.

pub mod csv_adapter;
