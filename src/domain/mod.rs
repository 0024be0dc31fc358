// Domain layer: film records, ports (interfaces) and the pure scoring rules.

pub mod model;
pub mod ports;
pub mod scoring;
