// NOTE: needs to be on top because it defines macros used elsewhere.
#[macro_use]
pub mod web;

pub mod app;
pub mod component;
pub mod dom;
pub mod effect;
pub mod error;
pub mod plugin;

mod runtime;

pub use self::{
    app::{inject, App, Root, Stage},
    error::BootstrapError,
    plugin::{InstallError, Plugin},
    web::DomStr,
};

pub use futures_signals as signal;
