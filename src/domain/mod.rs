// Domain layer: limits, label tables, request records and the model port.

pub mod labels;
pub mod limits;
pub mod model;
pub mod ports;
