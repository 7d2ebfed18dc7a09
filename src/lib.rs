// Public modules
pub mod types;
pub mod config;
pub mod parsing;
pub mod aggregate;
pub mod report;
pub mod sensu;
pub mod collector;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::{parse_label_arg, parse_namespaces, LabelSelector};
pub use aggregate::{select_events, Aggregate, Tally};
pub use report::{evaluate, percent_ok, Verdict};
pub use sensu::{BackendError, SensuClient, Session};
pub use collector::EventCollector;
