#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(missing_debug_implementations)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(test, deny(rust_2018_idioms))]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod intent;
pub mod recognizer;
pub mod render;
pub mod repl;
pub mod session;

pub use catalog::{GraphQuery, QueryTemplate, TemplateShape, synthesize};
pub use error::{ExecutionError, RecognizerError, RenderError, SynthesisError};
pub use executor::{GraphExecutor, ResultRow};
pub use intent::{EntityBinding, Intent, Slot};
pub use recognizer::{EntityCategory, EntityRecognizer, Recognition, Recognizer};
pub use session::{Outcome, Reply, Session};
