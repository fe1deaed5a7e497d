//! Component trait system for TUI architecture
//!
//! This module defines the contracts that UI components implement.
//! Instead of App knowing how to render/scroll/copy for every panel,
//! components declare their own capabilities through traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (orchestrator: routes input, owns the panel stack)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │   Code   │   │   Code   │   │  Status  │
//!        │  Panel 0 │   │  Panel 1 │   │   Bar    │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - Base trait: render + identity
//! - [`Scrollable`] - Components with scrollable content
//! - [`Copyable`] - Components that provide clipboard content
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
