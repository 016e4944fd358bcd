pub mod completeness;
pub mod consistency;
pub mod drift;
pub mod duplicates;
