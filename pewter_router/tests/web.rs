wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test;

use pewter::{
    app::{inject, App, Root},
    dom::builder::div,
    web,
};
use pewter_router::{Router, RouterHandle};

fn fresh_target(id: &str) -> web_sys::Element {
    let doc = web::document();
    if let Some(elem) = doc.get_element_by_id(id) {
        elem.remove();
    }

    let elem = doc.create_element("div").unwrap();
    elem.set_id(id);
    doc.body().unwrap().append_child(&elem).unwrap();
    elem
}

fn booted(target_id: &str) -> (App, RouterHandle) {
    fresh_target(target_id);

    let mut app = App::new(Root::view(|| div().and("routed app")))
        .install(Router::new())
        .unwrap();
    app.mount(&format!("#{target_id}")).unwrap();

    let handle = app.context::<RouterHandle>().expect("router installed");
    (app, handle)
}

#[wasm_bindgen_test]
fn test_initial_route_is_resolved_at_mount() {
    let (_app, handle) = booted("router-app");

    let path = web::window().location().pathname().unwrap();
    assert_eq!(handle.current(), path);
}

#[wasm_bindgen_test]
fn test_navigate_updates_state_and_history() {
    let (_app, handle) = booted("router-nav");

    handle.navigate("/about");

    assert_eq!(handle.current(), "/about");
    assert_eq!(web::window().location().pathname().unwrap(), "/about");
}

#[wasm_bindgen_test]
fn test_handle_is_injectable_during_render() {
    fresh_target("router-inject");

    let mut app = App::new(Root::view(|| {
        let router = inject::<RouterHandle>().expect("router provided before mount");
        div().child(router.link("/somewhere", "go"))
    }))
    .install(Router::new())
    .unwrap();
    app.mount("#router-inject").unwrap();

    let handle = app.context::<RouterHandle>().unwrap();

    let anchor = web::document()
        .query_selector("#router-inject a")
        .unwrap()
        .unwrap();
    anchor
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
        .click();

    assert_eq!(handle.current(), "/somewhere");
    assert_eq!(web::window().location().pathname().unwrap(), "/somewhere");
}
