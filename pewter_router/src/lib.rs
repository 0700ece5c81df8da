//! Client-side router for pewter applications.
//!
//! The router is a capability plugin: installing it into an [`App`]
//! provides a cloneable [`RouterHandle`] through the instance context,
//! and the mount-time activation resolves the initial location and keeps
//! the current path in sync with the browser history (`pushState` on
//! navigation, `popstate` for back/forward). Route tables and matching
//! live in application code; this crate only owns the location state.

use std::{cell::RefCell, rc::Rc};

use futures_signals::signal::{Mutable, Signal};
use wasm_bindgen::JsValue;

use pewter::{
    app::App,
    dom::{builder::a, Attr, ClickEvent, Ev, TagBuilder},
    effect::EventSubscription,
    plugin::{InstallError, Plugin},
    web, DomStr,
};

/// The router plugin.
///
/// ```ignore
/// App::new(root).install(Router::new())?.mount("#app")?;
/// ```
pub struct Router {
    base: String,
    handle: Option<RouterHandle>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            base: String::new(),
            handle: None,
        }
    }

    /// A router whose application is served below a path prefix. The
    /// prefix is stripped from observed locations and prepended to
    /// navigation targets.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: normalize_base(base.into()),
            handle: None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for Router {
    fn install(&mut self, app: &mut App) -> Result<(), InstallError> {
        let handle = RouterHandle::new(self.base.clone());
        app.provide(handle.clone());
        self.handle = Some(handle);
        Ok(())
    }

    fn activate(&mut self, _app: &App) {
        if let Some(handle) = &self.handle {
            handle.start();
        }
    }
}

struct Inner {
    base: String,
    current: Mutable<String>,
    popstate: RefCell<Option<EventSubscription>>,
}

/// Cloneable handle to the router state, registered in the app context
/// during installation. Views read it through `pewter::inject`.
#[derive(Clone)]
pub struct RouterHandle {
    inner: Rc<Inner>,
}

impl RouterHandle {
    fn new(base: String) -> Self {
        Self {
            inner: Rc::new(Inner {
                base,
                current: Mutable::new("/".to_string()),
                popstate: RefCell::new(None),
            }),
        }
    }

    /// Resolve the initial location and follow history changes. Called
    /// from plugin activation, once the application is live.
    fn start(&self) {
        self.inner
            .current
            .set_neq(normalize_path(&self.inner.base, &location_path()));
        tracing::debug!(path = %self.current(), "router resolved initial route");

        let this = self.clone();
        let subscription = EventSubscription::subscribe::<web_sys::PopStateEvent, _>(
            web::window().clone().into(),
            Ev::PopState,
            move |_event| {
                let path = normalize_path(&this.inner.base, &location_path());
                tracing::trace!(%path, "history navigation");
                this.inner.current.set_neq(path);
            },
        );
        *self.inner.popstate.borrow_mut() = Some(subscription);
    }

    /// The current path, relative to the router base.
    pub fn current(&self) -> String {
        self.inner.current.get_cloned()
    }

    /// Signal of the current path, for reactive views.
    pub fn signal(&self) -> impl Signal<Item = String> {
        self.inner.current.signal_cloned()
    }

    /// Navigate to `path`, pushing a new history entry.
    pub fn navigate(&self, path: &str) {
        let path = normalize_path(&self.inner.base, path);
        let url = format!("{}{}", self.inner.base, path);

        match web::window().history() {
            Ok(history) => {
                if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&url)) {
                    tracing::error!(?err, %url, "could not push history entry");
                    return;
                }
            }
            Err(err) => {
                tracing::error!(?err, "browser history is not available");
                return;
            }
        }

        tracing::trace!(%path, "navigated");
        self.inner.current.set_neq(path);
    }

    /// An anchor for in-app navigation: renders a regular `<a href>` but
    /// intercepts the click and routes through [`navigate`] instead of a
    /// page load.
    ///
    /// [`navigate`]: RouterHandle::navigate
    pub fn link<'a>(&self, path: &str, label: impl Into<DomStr<'a>>) -> TagBuilder {
        let this = self.clone();
        let target = normalize_path(&self.inner.base, path);
        let href = format!("{}{}", self.inner.base, target);

        a().attr(Attr::Href, href)
            .text(label)
            .on(move |event: ClickEvent| {
                event.prevent_default();
                this.navigate(&target);
            })
    }
}

fn location_path() -> String {
    web::window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

fn normalize_base(base: String) -> String {
    let mut base = base.trim_end_matches('/').to_string();
    if !base.is_empty() && !base.starts_with('/') {
        base.insert(0, '/');
    }
    base
}

/// Strip the base prefix and bring a path into canonical form: leading
/// slash, no trailing slash except for the root itself.
fn normalize_path(base: &str, path: &str) -> String {
    let path = if base.is_empty() {
        path
    } else {
        path.strip_prefix(base).unwrap_or(path)
    };

    let mut out = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{normalize_base, normalize_path};

    #[test]
    fn path_normalization() {
        assert_eq!(normalize_path("", "/"), "/");
        assert_eq!(normalize_path("", ""), "/");
        assert_eq!(normalize_path("", "about"), "/about");
        assert_eq!(normalize_path("", "/about/"), "/about");
        assert_eq!(normalize_path("", "/a/b/"), "/a/b");
    }

    #[test]
    fn base_prefix_is_stripped() {
        assert_eq!(normalize_path("/app", "/app/users"), "/users");
        assert_eq!(normalize_path("/app", "/app"), "/");
        // Locations outside the base pass through untouched.
        assert_eq!(normalize_path("/app", "/other"), "/other");
    }

    #[test]
    fn base_normalization() {
        assert_eq!(normalize_base(String::new()), "");
        assert_eq!(normalize_base("/app/".to_string()), "/app");
        assert_eq!(normalize_base("app".to_string()), "/app");
    }
}
