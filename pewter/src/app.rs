//! The application bootstrap: factory, plugin installation and the
//! one-time mount that attaches the instance to the host document.

use std::collections::HashMap;

use crate::{
    component::{build_component, Component},
    dom::View,
    error::BootstrapError,
    plugin::Plugin,
    runtime::Runtime,
    web,
};

/// Instance-scoped state registered by plugins, keyed by type.
pub struct ContextContainer {
    values: HashMap<std::any::TypeId, Box<dyn std::any::Any>>,
}

impl ContextContainer {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
        }
    }

    pub fn register<T: 'static>(&mut self, value: T) {
        let id = std::any::TypeId::of::<T>();
        self.values.insert(id, Box::new(value));
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        let id = std::any::TypeId::of::<T>();
        let value = self.values.get(&id)?;
        value.downcast_ref()
    }

    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        let id = std::any::TypeId::of::<T>();
        let value = self.values.remove(&id)?;
        value.downcast::<T>().ok().map(|x| *x)
    }
}

impl Default for ContextContainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle stage of an [`App`].
///
/// An instance only ever moves forward: `Created` → `Installed` →
/// `Mounted`. Repeated installations keep it in `Installed`; `Mounted` is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Created,
    Installed,
    Mounted,
}

/// The root definition an application is created from.
///
/// All dom work is deferred: constructing a `Root` touches neither the
/// document nor the window, so the factory stays side effect free and
/// tests can build definitions on any target.
pub struct Root(Box<dyn FnOnce() -> View>);

impl Root {
    /// A root rendered by a plain closure.
    pub fn view<F, V>(render: F) -> Self
    where
        F: FnOnce() -> V + 'static,
        V: Into<View>,
    {
        Self(Box::new(move || render().into()))
    }

    /// A root backed by a [`Component`].
    pub fn component<C: Component>(props: C::Properties) -> Self
    where
        C::Properties: 'static,
    {
        Self(Box::new(move || build_component::<C>(props)))
    }

    fn build(self) -> View {
        (self.0)()
    }
}

/// A single application instance.
///
/// Created once per process by [`App::new`], extended with [`App::install`]
/// and bound to the host document with [`App::mount`]. The instance is an
/// explicitly owned handle, not a hidden global: tests construct as many
/// independent instances as they like.
pub struct App {
    root: Option<Root>,
    runtime: Runtime,
    plugins: Vec<Box<dyn Plugin>>,
    stage: Stage,
    mounted: Option<View>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("stage", &self.stage)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// The application factory.
    ///
    /// Returns a fresh, unmounted instance in stage [`Stage::Created`].
    /// Deterministic for a given definition and free of observable side
    /// effects.
    pub fn new(root: Root) -> Self {
        tracing::debug!("created application instance");
        Self {
            root: Some(root),
            runtime: Runtime::new(),
            plugins: Vec::new(),
            stage: Stage::Created,
            mounted: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Install a plugin into this instance.
    ///
    /// Consumes and returns the instance so installations chain:
    ///
    /// ```ignore
    /// App::new(root).install(Router::new())?.mount("#app")?;
    /// ```
    ///
    /// Installations are applied in call order; a later plugin observes
    /// state provided by earlier ones. If the plugin's hook fails the
    /// instance is dropped with [`BootstrapError::PluginInstallation`] —
    /// a partially-installed application never reaches mount.
    pub fn install<P: Plugin + 'static>(mut self, mut plugin: P) -> Result<Self, BootstrapError> {
        let name = std::any::type_name::<P>();
        if self.stage == Stage::Mounted {
            tracing::warn!(plugin = name, "rejected plugin installation after mount");
            return Err(BootstrapError::AlreadyMounted);
        }

        plugin
            .install(&mut self)
            .map_err(|source| BootstrapError::PluginInstallation {
                plugin: name.to_string(),
                source,
            })?;

        self.plugins.push(Box::new(plugin));
        self.stage = Stage::Installed;
        tracing::debug!(plugin = name, "installed plugin");
        Ok(self)
    }

    /// Register an instance-scoped value, readable by later plugins and,
    /// during render, through [`inject`].
    pub fn provide<T: 'static>(&mut self, value: T) {
        self.runtime.register(value);
    }

    /// Read back a value registered with [`App::provide`].
    pub fn context<T: Clone + 'static>(&self) -> Option<T> {
        self.runtime.get_cloned::<T>()
    }

    /// Bind the instance to the element `selector` resolves to and perform
    /// the first render.
    ///
    /// The stage machine is enforced here with runtime checks rather than
    /// caller discipline: mounting from [`Stage::Created`] or mounting
    /// twice fails loudly, and on any failure the document is left
    /// unchanged. On success every installed plugin receives its
    /// [`Plugin::activate`] notification, in installation order, before
    /// control returns — a router's initial location is resolved before
    /// the first paint.
    pub fn mount(&mut self, selector: &str) -> Result<(), BootstrapError> {
        match self.stage {
            Stage::Mounted => {
                tracing::warn!(selector, "rejected second mount of application instance");
                return Err(BootstrapError::AlreadyMounted);
            }
            Stage::Created => {
                tracing::warn!(selector, "rejected mount of instance without plugins");
                return Err(BootstrapError::MountBeforeInstall);
            }
            Stage::Installed => {}
        }

        let target = web::query_selector(selector).ok_or_else(|| {
            BootstrapError::MountTargetNotFound {
                selector: selector.to_string(),
            }
        })?;

        // A previous mount attempt that consumed the root leaves the
        // definition error sticky.
        let root = self
            .root
            .take()
            .ok_or(BootstrapError::InvalidRootDefinition)?;

        // Render against a detached tree first. The document is only
        // touched once the definition has proven to produce content.
        let view = self.runtime.with(|| root.build());
        if !view.has_content() {
            return Err(BootstrapError::InvalidRootDefinition);
        }

        view.attach(&target);
        self.mounted = Some(view);
        self.stage = Stage::Mounted;
        tracing::debug!(selector, "mounted application");

        let mut plugins = std::mem::take(&mut self.plugins);
        for plugin in &mut plugins {
            plugin.activate(&*self);
        }
        self.plugins = plugins;

        Ok(())
    }

    /// Leak the instance.
    ///
    /// After a successful mount, ownership conceptually belongs to the
    /// host document for the rest of the page's lifetime. Top-level
    /// callers use this instead of letting the instance drop, which would
    /// tear the rendered tree's cleanup hooks down again. Tests simply
    /// keep the instance alive instead.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

/// Read a value from the active instance's context. Only available while
/// the instance is rendering or one of its futures is being polled.
pub fn inject<T: Clone + 'static>() -> Option<T> {
    Runtime::current().and_then(|runtime| runtime.get_cloned::<T>())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::plugin::InstallError;

    fn root() -> Root {
        // Never forced by these tests; mount needs a browser.
        Root::view(|| View::Empty)
    }

    #[derive(Clone, Default)]
    struct OrderLog(Rc<RefCell<Vec<&'static str>>>);

    struct First {
        log: OrderLog,
    }

    impl Plugin for First {
        fn install(&mut self, app: &mut App) -> Result<(), InstallError> {
            self.log.0.borrow_mut().push("first");
            app.provide(self.log.clone());
            Ok(())
        }
    }

    struct Second {
        saw_first: Rc<RefCell<Option<bool>>>,
    }

    impl Plugin for Second {
        fn install(&mut self, app: &mut App) -> Result<(), InstallError> {
            let log = app.context::<OrderLog>();
            *self.saw_first.borrow_mut() = Some(log.is_some());
            if let Some(log) = log {
                log.0.borrow_mut().push("second");
            }
            Ok(())
        }
    }

    struct Failing;

    impl Plugin for Failing {
        fn install(&mut self, _app: &mut App) -> Result<(), InstallError> {
            Err("boom".into())
        }
    }

    #[test]
    fn factory_returns_created_stage() {
        let app = App::new(root());
        assert_eq!(app.stage(), Stage::Created);
    }

    #[test]
    fn install_transitions_to_installed_and_preserves_order() {
        let log = OrderLog::default();
        let saw_first = Rc::new(RefCell::new(None));

        let app = App::new(root())
            .install(First { log: log.clone() })
            .unwrap()
            .install(Second {
                saw_first: saw_first.clone(),
            })
            .unwrap();

        assert_eq!(app.stage(), Stage::Installed);
        assert_eq!(*log.0.borrow(), vec!["first", "second"]);
        // The second plugin observed the first plugin's state.
        assert_eq!(*saw_first.borrow(), Some(true));
    }

    #[test]
    fn earlier_plugin_cannot_observe_later_state() {
        let saw_first = Rc::new(RefCell::new(None));

        // Reversed order: the probe installs before the provider.
        let app = App::new(root())
            .install(Second {
                saw_first: saw_first.clone(),
            })
            .unwrap()
            .install(First {
                log: OrderLog::default(),
            })
            .unwrap();

        assert_eq!(app.stage(), Stage::Installed);
        assert_eq!(*saw_first.borrow(), Some(false));
    }

    #[test]
    fn failing_install_aborts_the_bootstrap() {
        let err = App::new(root()).install(Failing).unwrap_err();
        match err {
            BootstrapError::PluginInstallation { plugin, source } => {
                assert!(plugin.contains("Failing"));
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mount_from_created_is_rejected_before_touching_the_document() {
        // Runs on a native target: the stage check fires before any
        // document access.
        let mut app = App::new(root());
        let err = app.mount("#app").unwrap_err();
        assert!(matches!(err, BootstrapError::MountBeforeInstall));
        assert_eq!(app.stage(), Stage::Created);
    }

    #[test]
    fn context_container_roundtrip() {
        let mut ctx = ContextContainer::new();
        ctx.register(7u32);
        ctx.register("hello");

        assert_eq!(ctx.get::<u32>(), Some(&7));
        assert_eq!(ctx.get::<&str>(), Some(&"hello"));
        assert_eq!(ctx.get::<u64>(), None);

        assert_eq!(ctx.remove::<u32>(), Some(7));
        assert_eq!(ctx.get::<u32>(), None);
    }
}
