// Domain layer: record model and ports. No filesystem access here.

pub mod model;
pub mod ports;
