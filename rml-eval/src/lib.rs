pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;

pub use config::Config;
pub use error::RuntimeError;
pub use evaluator::Evaluator;
