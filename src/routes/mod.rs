mod health_check;
mod home;
mod send;

pub use health_check::*;
pub use home::*;
pub use send::*;
