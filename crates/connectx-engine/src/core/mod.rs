pub use self::{board::*, cell::*, config::*, rules::*, window::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod config;
pub(crate) mod rules;
pub(crate) mod window;
