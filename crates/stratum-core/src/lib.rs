//! Stratum Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stratum diagram
//! engine and its payload parser. It includes:
//!
//! - **Geometry**: Integral points, sizes and bounding boxes ([`geometry`] module)
//! - **Tiers**: The fixed architectural stacking order ([`tier::Tier`])
//! - **Specs**: Strict component and edge requests and the loose payloads
//!   they are decoded from ([`spec`] module)
//! - **Catalog**: The read-only style lookup table ([`catalog::StyleCatalog`])

pub mod catalog;
pub mod geometry;
pub mod spec;
pub mod tier;
