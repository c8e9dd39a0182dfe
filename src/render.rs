pub mod backend;
pub mod composite;
pub mod cpu;
pub mod pipeline;
