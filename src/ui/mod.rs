//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Main draw functions
//! - `theme.rs` - Color themes and presets
//! - `layout.rs` - Grid geometry
//! - `day_cell.rs` - Day cell widget

mod draw;
pub mod day_cell;
pub mod layout;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
