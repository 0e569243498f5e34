//! # Architecture Abstraction Layer
//!
//! Hardware tick sources for the scheduler. Currently implements the
//! Cortex-M4 SysTick port; other targets plug in by adding a sibling
//! module that implements [`crate::TickSource`].

pub mod cortex_m4;
