// app/mod.rs - Application State
//
// Platform- and toolkit-independent state shared by the overlay and the
// settings window.

mod state;

pub use state::*;
