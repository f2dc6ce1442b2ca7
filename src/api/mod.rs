//! Outbound market data providers

pub mod yahoo;
