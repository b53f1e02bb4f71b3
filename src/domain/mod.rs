// Domain layer: records, grade scale, course rules and ports. No I/O here.

pub mod course;
pub mod model;
pub mod ports;
pub mod scale;
