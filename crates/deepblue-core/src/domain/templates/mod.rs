//! Document generators.
//!
//! - [`datastore`]: fragments for the optional `db` service
//! - [`stack`]: the [`StackTemplate`] contract and shared compose assembly
//! - one generator per technology
//! - [`dockerignore`] and [`proxy`]: the auxiliary documents

pub mod datastore;
pub mod dockerignore;
pub mod proxy;
pub mod stack;

mod go;
mod java;
mod node;
mod php;
mod python;
mod ruby;
mod rust;

pub use datastore::DatastoreFragments;
pub use dockerignore::dockerignore;
pub use go::GoTemplate;
pub use java::JavaTemplate;
pub use node::NodeTemplate;
pub use php::PhpTemplate;
pub use proxy::nginx_conf;
pub use python::PythonTemplate;
pub use ruby::RubyTemplate;
pub use rust::RustTemplate;
pub use stack::StackTemplate;
