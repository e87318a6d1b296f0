pub mod display;
pub mod fence;
pub mod interrupt;
pub mod transcript;
