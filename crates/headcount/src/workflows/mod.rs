pub mod roster;
pub mod scenario;
