pub mod alarm;
pub mod cli;
pub mod clock;
pub mod conf;
pub mod event;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod stats;
pub mod window;

pub use event::Hit;
