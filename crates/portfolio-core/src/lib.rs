//! Runtime for a single-page portfolio site.
//!
//! The centre of the crate is [`binder`], which keeps the page in sync with a
//! configuration record owned by an external site builder ([`host`]). The
//! [`page`] module covers the rest of the page script: navbar styling,
//! anchor scrolling, reveal animations, stat counters, the profile image
//! preview and the simulated contact form.

pub mod binder;
pub mod bindings;
pub mod config;
pub mod document;
pub mod host;
pub mod html;
pub mod page;

pub use binder::{Capabilities, Capability, ConfigBinder, EditPanelValues, SharedConfig};
pub use config::{ConfigField, ConfigRecord, FieldValue};
pub use document::{Document, PageDocument};
pub use host::{ConfigPatch, HostChannel, LocalHost, Registration, SiteHost, register_with_host};
