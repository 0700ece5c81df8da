use crate::app::App;

/// Error type plugins report from their installation hook. Boxed so each
/// plugin keeps its own error enum.
pub type InstallError = Box<dyn std::error::Error + 'static>;

/// A capability installed into an [`App`] before it mounts.
///
/// Plugins extend an application instance by registering instance-scoped
/// state ([`App::provide`]) or global behaviors during [`install`].
/// Installation runs in the exact order requested by the caller: a plugin
/// can observe state registered by earlier plugins but not later ones.
///
/// [`activate`] fires once, during the mount that makes the application
/// live. This is where a router resolves the initial location, timers
/// start, and similar go-live work happens.
///
/// [`install`]: Plugin::install
/// [`activate`]: Plugin::activate
pub trait Plugin {
    fn install(&mut self, app: &mut App) -> Result<(), InstallError>;

    fn activate(&mut self, app: &App) {
        let _ = app;
    }
}
