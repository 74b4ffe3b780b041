pub mod journal;
pub mod trips;
