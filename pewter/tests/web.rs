wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use std::{cell::Cell, rc::Rc};

use futures_signals::signal::Mutable;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::wasm_bindgen_test;

use futures_signals::signal::SignalExt;
use pewter::{
    app::{inject, App, Root, Stage},
    component::{Component, Context},
    dom::{
        builder::{button, div, span},
        Attr, ClickEvent, Fragment, TagBuilder, View,
    },
    effect::spawn_guarded,
    error::BootstrapError,
    plugin::{InstallError, Plugin},
};
use wasm_bindgen::JsCast;

fn fresh_target(id: &str) -> web_sys::Element {
    let doc = pewter::web::document();
    if let Some(elem) = doc.get_element_by_id(id) {
        elem.remove();
    }

    let elem = doc.create_element("div").unwrap();
    elem.set_id(id);
    doc.body().unwrap().append_child(&elem).unwrap();
    elem
}

async fn tick() {
    let promise = js_sys::Promise::resolve(&JsValue::NULL);
    JsFuture::from(promise).await.unwrap();
}

struct Noop;

impl Plugin for Noop {
    fn install(&mut self, _app: &mut App) -> Result<(), InstallError> {
        Ok(())
    }
}

/// Records whether the instance was already live when activation fired.
struct ActivationProbe {
    saw_mounted: Rc<Cell<bool>>,
}

impl Plugin for ActivationProbe {
    fn install(&mut self, _app: &mut App) -> Result<(), InstallError> {
        Ok(())
    }

    fn activate(&mut self, app: &App) {
        self.saw_mounted.set(app.stage() == Stage::Mounted);
    }
}

#[wasm_bindgen_test]
fn test_mount_renders_root_and_activates_plugins() {
    let target = fresh_target("app");
    let saw_mounted = Rc::new(Cell::new(false));

    let mut app = App::new(Root::view(|| {
        div().attr(Attr::Id, "shell").and("hello")
    }))
    .install(ActivationProbe {
        saw_mounted: saw_mounted.clone(),
    })
    .unwrap();

    app.mount("#app").unwrap();

    assert_eq!(app.stage(), Stage::Mounted);
    assert_eq!(target.inner_html(), r#"<div id="shell">hello</div>"#);
    assert!(saw_mounted.get());
}

#[wasm_bindgen_test]
fn test_second_mount_fails_and_leaves_first_render_intact() {
    let target = fresh_target("app-twice");

    let mut app = App::new(Root::view(|| div().and("once")))
        .install(Noop)
        .unwrap();

    app.mount("#app-twice").unwrap();
    let rendered = target.inner_html();

    let err = app.mount("#app-twice").unwrap_err();
    assert!(matches!(err, BootstrapError::AlreadyMounted));
    assert_eq!(app.stage(), Stage::Mounted);
    assert_eq!(target.inner_html(), rendered);
}

#[wasm_bindgen_test]
fn test_missing_target_leaves_document_unchanged() {
    let doc = pewter::web::document();
    let body = doc.body().unwrap();
    let children_before = body.child_element_count();

    let mut app = App::new(Root::view(|| div().and("never rendered")))
        .install(Noop)
        .unwrap();

    let err = app.mount("#does-not-exist").unwrap_err();
    match err {
        BootstrapError::MountTargetNotFound { selector } => {
            assert_eq!(selector, "#does-not-exist");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(app.stage(), Stage::Installed);
    assert_eq!(body.child_element_count(), children_before);
}

#[wasm_bindgen_test]
fn test_empty_root_definition_is_rejected_before_attach() {
    let target = fresh_target("app-empty");

    let mut app = App::new(Root::view(|| View::Empty)).install(Noop).unwrap();

    let err = app.mount("#app-empty").unwrap_err();
    assert!(matches!(err, BootstrapError::InvalidRootDefinition));
    assert_eq!(target.inner_html(), "");
}

#[wasm_bindgen_test]
async fn test_signal_bindings_survive_mount() {
    let target = fresh_target("app-signal");
    let value = Mutable::new("first".to_string());

    let signal = value.signal_cloned();
    let mut app = App::new(Root::view(move || {
        div().child(span().text_signal(signal))
    }))
    .install(Noop)
    .unwrap();

    app.mount("#app-signal").unwrap();
    tick().await;
    assert_eq!(target.inner_html(), "<div><span>first</span></div>");

    value.set("second".to_string());
    tick().await;
    assert_eq!(target.inner_html(), "<div><span>second</span></div>");
}

#[wasm_bindgen_test]
async fn test_effect_guard_aborts_on_drop() {
    let ran = Rc::new(Cell::new(false));

    let ran2 = ran.clone();
    let guard = spawn_guarded(async move {
        ran2.set(true);
    });
    drop(guard);

    tick().await;
    assert!(!ran.get());
}

#[wasm_bindgen_test]
fn test_install_after_mount_is_rejected() {
    fresh_target("app-late-install");

    let mut app = App::new(Root::view(|| div().and("late")))
        .install(Noop)
        .unwrap();
    app.mount("#app-late-install").unwrap();

    let err = app.install(Noop).unwrap_err();
    assert!(matches!(err, BootstrapError::AlreadyMounted));
}

#[wasm_bindgen_test]
fn test_fragment_root_attaches_every_item() {
    let target = fresh_target("app-fragment");

    let mut app = App::new(Root::view(|| Fragment {
        items: vec![div().and("a").into(), div().and("b").into()],
    }))
    .install(Noop)
    .unwrap();

    app.mount("#app-fragment").unwrap();
    assert_eq!(target.inner_html(), "<div>a</div><div>b</div>");
}

struct Counter {
    count: Mutable<u32>,
}

impl Component for Counter {
    type Properties = u32;

    fn init(props: Self::Properties, _ctx: Context<'_, Self>) -> Self {
        Self {
            count: Mutable::new(props),
        }
    }

    fn render(&mut self, ctx: Context<'_, Self>) -> TagBuilder {
        let handle = ctx.handle();
        div()
            .child(span().text_signal(self.count.signal().map(|v| v.to_string())))
            .child(button().and("+").on(move |_: ClickEvent| {
                handle.apply(|counter, _ctx| {
                    counter.count.replace_with(|v| *v + 1);
                });
            }))
    }
}

#[wasm_bindgen_test]
async fn test_component_root_stays_interactive_after_mount() {
    let target = fresh_target("app-counter");

    let mut app = App::new(Root::component::<Counter>(3))
        .install(Noop)
        .unwrap();
    app.mount("#app-counter").unwrap();

    tick().await;
    let span = target.query_selector("span").unwrap().unwrap();
    assert_eq!(span.inner_html(), "3");

    let btn = target.query_selector("button").unwrap().unwrap();
    btn.dyn_into::<web_sys::HtmlElement>().unwrap().click();
    tick().await;
    assert_eq!(span.inner_html(), "4");
}

#[derive(Clone)]
struct Greeting(Rc<String>);

struct Greeter;

impl Plugin for Greeter {
    fn install(&mut self, app: &mut App) -> Result<(), InstallError> {
        app.provide(Greeting(Rc::new("from plugin".to_string())));
        Ok(())
    }
}

#[wasm_bindgen_test]
fn test_render_can_inject_plugin_state() {
    let target = fresh_target("app-inject");

    let mut app = App::new(Root::view(|| {
        let greeting = inject::<Greeting>().expect("greeting provided");
        div().and(greeting.0.as_str())
    }))
    .install(Greeter)
    .unwrap();

    app.mount("#app-inject").unwrap();
    assert_eq!(target.inner_html(), "<div>from plugin</div>");
}
