pub mod orchestrator;
pub mod validator;

pub use orchestrator::run;
pub use validator::validate;
