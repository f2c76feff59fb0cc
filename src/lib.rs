pub mod analysis;
pub mod commands;
pub mod repair;
pub mod report;
pub mod shared;
pub mod wav;
