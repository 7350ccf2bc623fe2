//! waltz - build-time icon collection
//!
//! Scans source files for icon references (`<icon icon="home">`,
//! `icon: 'solid:star'`, ...), resolves each one to an SVG asset under
//! `<icons>/<style>/<filename>.svg`, and writes either one combined sprite
//! or individually copied icons plus a preload script.

pub mod accumulator;
pub mod build;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod extract;
pub mod hooks;
pub mod icon;
pub mod output;
pub mod patterns;
pub mod preload;
pub mod report;
pub mod sprite;
pub mod store;

pub use accumulator::Accumulator;
pub use build::{Build, BuildSummary};
pub use config::{Config, EmitMode};
pub use discovery::{discover, Discovery};
pub use emit::{BuildHash, Emitted};
pub use error::{Result, WaltzError};
pub use extract::{Extractor, ScanOutcome};
pub use hooks::{ExtraSources, PreEmit};
pub use icon::{resolve, IconName, IconRef};
pub use patterns::{Matcher, MatcherSpec, PatternSet};
pub use report::{Diagnostic, Report, Severity};
pub use sprite::{assemble, Sprite};
pub use store::{IconStore, LoadOutcome, MissingIcon};
