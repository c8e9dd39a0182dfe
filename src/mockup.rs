pub mod brightness;
pub mod eval;
pub mod layout;
pub mod model;
pub mod zone;
