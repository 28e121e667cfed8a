pub mod logging;
pub mod messages;
