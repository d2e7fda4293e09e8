// Domain layer: value types and the ports the outer layers implement.

pub mod model;
pub mod ports;
