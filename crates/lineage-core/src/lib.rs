//! Lineage Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Lineage family
//! tree layout engine and its renderers. It includes:
//!
//! - **Family**: The input model of nested persons ([`family::Person`])
//! - **Diagram**: The positioned output model ([`diagram::Node`], [`diagram::Link`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke definitions for connectors ([`draw`] module)

pub mod color;
pub mod diagram;
pub mod draw;
pub mod family;
pub mod geometry;
