pub mod delivery;
pub mod directory;
pub mod event;
