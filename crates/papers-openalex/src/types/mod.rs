mod common;
mod work;

pub use common::*;
pub use work::*;
