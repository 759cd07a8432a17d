// Domain layer: table model, source/sink descriptors and ports (interfaces).

pub mod descriptor;
pub mod model;
pub mod ports;
