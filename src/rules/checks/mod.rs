//! Concrete rule variants

pub mod build_targets;
pub mod config_source;
pub mod coverage;
pub mod gitignore;
pub mod license;
pub mod secrets;

pub use build_targets::BuildTargetsRule;
pub use config_source::ConfigSourceRule;
pub use coverage::CoverageRule;
pub use gitignore::GitignoreRule;
pub use license::LicenseRule;
pub use secrets::SecretsRule;
