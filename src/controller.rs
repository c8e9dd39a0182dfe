pub mod preview;
pub mod state;
