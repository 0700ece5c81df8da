use crate::plugin::InstallError;

/// Failures of the bootstrap sequence.
///
/// Each variant signals a structural misconfiguration, not a transient
/// condition: none of them is worth retrying, and after any of them the
/// application must be considered not-started. No partially mounted
/// document is ever left behind.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The root definition rendered no content. Detected when the
    /// definition is first forced, before any document mutation.
    #[error("root definition produced an empty view")]
    InvalidRootDefinition,

    /// A plugin returned an error from its installation hook. The
    /// instance is dropped with this error so a partially-installed
    /// application can never reach mount.
    #[error("plugin {plugin} failed to install: {source}")]
    PluginInstallation {
        plugin: String,
        #[source]
        source: InstallError,
    },

    /// The mount selector did not resolve to an element in the host
    /// document (or was not a valid selector).
    #[error("mount target {selector:?} did not match any element")]
    MountTargetNotFound { selector: String },

    /// An operation reached an instance in its terminal `Mounted` stage:
    /// a second `mount`, or a plugin installation after mount. The first
    /// mount's render is unaffected.
    #[error("application instance is already mounted")]
    AlreadyMounted,

    /// `mount` was invoked on an instance that never saw a plugin
    /// installation. Mounting before installation would let the first
    /// render run without plugin-provided state.
    #[error("mount requested before plugin installation")]
    MountBeforeInstall,
}
