// Adapters layer: concrete input providers and presentation helpers around the core.

pub mod links;
pub mod scan;
pub mod sheet;
