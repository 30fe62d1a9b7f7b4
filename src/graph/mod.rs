//! Graph construction and representation
//!
//! This module provides the co-occurrence graph builder, its CSR snapshot
//! for ranking, and connected component discovery for phrase assembly.

pub mod builder;
pub mod components;
pub mod csr;
