// Domain layer: models and the store ports. Only std/serde/decimal dependencies here.

pub mod model;
pub mod ports;
