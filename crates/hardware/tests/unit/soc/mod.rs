/// Address routing and device lookup.
pub mod interconnect;
