//! splunk-lib: desired-state catalog compiler for the splunk agent
//!
//! This crate turns one declarative parameter set into the complete set of
//! resources a convergence engine needs to install, configure, disable or
//! remove splunk on a host:
//! - `config`: raw parameters and their normalization into a typed `Config`
//! - `lifecycle`: the absent > disable > disableboot > installed precedence
//! - `builder`: package, service, configuration files and CLI scripts
//! - `integrations`: process monitoring, firewall rules and puppi
//! - `resource`: resource types, names and the hashed `Catalog`
//! - `eval`: the pipeline tying the above together

pub mod builder;
pub mod config;
pub mod consts;
pub mod eval;
pub mod facts;
pub mod integrations;
pub mod lifecycle;
pub mod resource;
pub mod template;
pub mod util;
