//! Module kernel: the [`Module`] trait, the lifecycle [`ModuleRegistry`] and
//! layered [`settings`].

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
