pub mod fingerprint;
pub mod plan;
