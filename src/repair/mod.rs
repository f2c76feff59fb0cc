mod donor;
pub mod median;

pub use donor::DonorRepair;
