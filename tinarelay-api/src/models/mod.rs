mod event;
mod power;
mod senml;
mod wire;

pub use event::*;
pub use power::*;
pub use senml::*;
pub use wire::*;
