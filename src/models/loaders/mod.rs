pub mod toml_loader;

pub use toml_loader::{load_job_from_toml, parse_job};
