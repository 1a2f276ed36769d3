pub mod invoke;
pub mod serve;
pub mod train;
