// Domain layer: brand constants, asset catalog, models and ports. No I/O here.

pub mod brand;
pub mod catalog;
pub mod model;
pub mod ports;
