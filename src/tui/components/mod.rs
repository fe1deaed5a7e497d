// Components module - reusable UI building blocks
//
// - Code panel: collapsible, highlighted code snippet (one per input)
// - Status bar: focus position, key hints, latest warning
// - Scrollbar: shared helper for overflowing panel bodies
//
// Each component is a focused, single-responsibility module.

pub mod code_panel;
pub mod scrollbar;
pub mod status_bar;
