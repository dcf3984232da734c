//! Pokédex CLI Library
//!
//! Exposes the resolver, stores, presenter and interactive loop for use in
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod presenter;
pub mod resolver;
