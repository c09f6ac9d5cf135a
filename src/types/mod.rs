pub mod object;
pub mod params;
pub mod probe;
