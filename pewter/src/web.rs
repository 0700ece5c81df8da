//! Helpers for interacting with the browser environment.

use js_sys::JsString;
use wasm_bindgen::JsCast;

/// Defines an enum that maps to plain string values and provides a cache
/// of `JsString`s for interaction with the dom.
///
/// This is useful for commonly used strings to prevent the overhead of
/// constant string re-encoding (UTF8 => UTF16 conversion) or hashing (in case
/// the wasm_bindgen interning feature is used).
#[macro_export]
macro_rules! make_str_enum {

    (
        $enum_name:ident {
            $( $name:ident = $value:literal, )*
        }
    ) => {
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( $name, )*
        }

        impl $enum_name {

            /// Convert to a string.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(
                        Self::$name => $value,
                    )*
                }
            }

            pub fn as_js_string(self) -> &'static js_sys::JsString {
                match self {
                $(
                    Self::$name => {
                        static mut VALUE: once_cell::unsync::OnceCell<js_sys::JsString> = once_cell::unsync::OnceCell::new();
                        unsafe {
                            VALUE.get_or_init(|| wasm_bindgen::JsCast::unchecked_into(wasm_bindgen::JsValue::from(self.as_str())))
                        }
                    }
                 )*

                }
            }
        }


        impl From<$enum_name> for $crate::DomStr<'static> {
            fn from(value: $enum_name) -> Self {
                Self::JsStr(value.as_js_string())
            }
        }
    };
}

use crate::dom::{Attr, Ev, Tag};

pub fn window() -> &'static web_sys::Window {
    static mut WINDOW: once_cell::unsync::Lazy<web_sys::Window> =
        once_cell::unsync::Lazy::new(|| web_sys::window().unwrap());

    unsafe { &WINDOW }
}

pub fn document() -> &'static web_sys::Document {
    static mut DOCUMENT: once_cell::unsync::Lazy<web_sys::Document> =
        once_cell::unsync::Lazy::new(|| web_sys::window().unwrap().document().unwrap());

    unsafe { &DOCUMENT }
}

/// Resolve a selector to a single element in the host document.
///
/// Both an unmatched and a syntactically invalid selector resolve to `None`:
/// the caller cares about "is there exactly one element to bind to", not
/// about selector grammar.
pub fn query_selector(selector: &str) -> Option<web_sys::Element> {
    document().query_selector(selector).ok().flatten()
}

/// The `web-sys` crate offers a lot of APIs, but notably there are no setters
/// that can take an existing JS string reference.
/// This prevents improving performance with manual interning of strings, which
/// is a lot of the work being done by DOM creation.
///
/// These manually created Javascript helper functions provide additional
/// functions for common operations and do take existing [`js_sys::JsString`]
/// values.
#[wasm_bindgen::prelude::wasm_bindgen(inline_js = "
export function __pewter_create_element(tag) {
    return document.createElement(tag);
}

export function __pewter_create_text_node_str(value) {
    return document.createTextNode(value)
}

export function __pewter_create_text_node_js(value) {
    return document.createTextNode(value)
}

export function __pewter_set_text_data(node, value) {
    node.data = value;
}

export function __pewter_elem_set_attr_js_value(elem, attr, value) {
    elem.setAttribute(attr, value);
}

export function __pewter_elem_set_attr_str_value(elem, attr, value) {
    elem.setAttribute(attr, value);
}

export function __pewter_elem_remove_attr(elem, attr) {
    elem.removeAttribute(attr);
}

export function __pewter_add_event_listener(elem, event, listener) {
    elem.addEventListener(event, listener);
}

export function __pewter_class_list_add_js(elem, value) {
    elem.classList.add(value);
}

export function __pewter_class_list_remove_js(elem, value) {
    elem.classList.remove(value);
}

export function __pewter_class_list_add_str(elem, value) {
    elem.classList.add(value);
}

export function __pewter_class_list_remove_str(elem, value) {
    elem.classList.remove(value);
}

")]
extern "C" {
    fn __pewter_create_element(tag: &js_sys::JsString) -> wasm_bindgen::JsValue;

    fn __pewter_create_text_node_str(value: &str) -> web_sys::Text;
    fn __pewter_create_text_node_js(value: &JsString) -> web_sys::Text;

    fn __pewter_set_text_data(node: &web_sys::Text, value: &JsString);

    fn __pewter_elem_set_attr_js_value(
        elem: &web_sys::Element,
        attr: &js_sys::JsString,
        value: &js_sys::JsString,
    );

    fn __pewter_elem_set_attr_str_value(
        elem: &web_sys::Element,
        attr: &js_sys::JsString,
        value: &str,
    );

    fn __pewter_elem_remove_attr(elem: &web_sys::Element, attr: &js_sys::JsString);

    fn __pewter_add_event_listener(
        elem: &web_sys::EventTarget,
        event: &js_sys::JsString,
        listener: &js_sys::Function,
    );

    // ClassList
    fn __pewter_class_list_add_js(elem: &web_sys::Element, value: &JsString);
    fn __pewter_class_list_remove_js(elem: &web_sys::Element, value: &JsString);
    fn __pewter_class_list_add_str(elem: &web_sys::Element, value: &str);
    fn __pewter_class_list_remove_str(elem: &web_sys::Element, value: &str);
}

static mut EMPTY_STRING: once_cell::unsync::OnceCell<JsString> = once_cell::unsync::OnceCell::new();

#[inline]
pub fn empty_string() -> &'static JsString {
    // Safety: safe in single-threaded context.
    unsafe { EMPTY_STRING.get_or_init(|| JsString::from("".to_string())) }
}

/// A string value destined for the dom.
///
/// Callers can hand over plain Rust strings or already-encoded
/// [`js_sys::JsString`]s; the setters below pick the cheapest path.
#[derive(Debug)]
pub enum DomStr<'a> {
    Str(&'a str),
    String(String),
    JsStr(&'a JsString),
    JsString(JsString),
}

impl<'a> From<&'a str> for DomStr<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for DomStr<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl<'a> From<String> for DomStr<'a> {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<'a> From<&'a JsString> for DomStr<'a> {
    fn from(value: &'a JsString) -> Self {
        Self::JsStr(value)
    }
}

pub fn create_element(tag: Tag) -> web_sys::Element {
    __pewter_create_element(tag.as_js_string()).unchecked_into()
}

pub fn create_text(value: DomStr<'_>) -> web_sys::Text {
    match value {
        DomStr::Str(value) => __pewter_create_text_node_str(value),
        DomStr::String(value) => __pewter_create_text_node_str(&value),
        DomStr::JsStr(value) => __pewter_create_text_node_js(value),
        DomStr::JsString(value) => __pewter_create_text_node_js(&value),
    }
}

pub fn set_text_data(text: &web_sys::Text, value: &DomStr<'_>) {
    match value {
        DomStr::Str(v) => {
            text.set_data(v);
        }
        DomStr::String(v) => {
            text.set_data(v);
        }
        DomStr::JsStr(v) => __pewter_set_text_data(text, v),
        DomStr::JsString(v) => {
            __pewter_set_text_data(text, v);
        }
    }
}

pub fn set_attribute(elem: &web_sys::Element, attr: Attr, value: DomStr<'_>) {
    match value {
        DomStr::Str(value) => {
            __pewter_elem_set_attr_str_value(elem, attr.as_js_string(), value);
        }
        DomStr::String(value) => {
            __pewter_elem_set_attr_str_value(elem, attr.as_js_string(), &value);
        }
        DomStr::JsStr(value) => {
            __pewter_elem_set_attr_js_value(elem, attr.as_js_string(), value);
        }
        DomStr::JsString(value) => {
            __pewter_elem_set_attr_js_value(elem, attr.as_js_string(), &value);
        }
    }
}

pub fn remove_attr(elem: &web_sys::Element, attr: Attr) {
    __pewter_elem_remove_attr(elem, attr.as_js_string());
}

pub fn elem_add_class(elem: &web_sys::Element, value: &DomStr<'_>) {
    match value {
        DomStr::Str(value) => {
            __pewter_class_list_add_str(elem, value);
        }
        DomStr::String(value) => {
            __pewter_class_list_add_str(elem, value);
        }
        DomStr::JsStr(value) => {
            __pewter_class_list_add_js(elem, value);
        }
        DomStr::JsString(value) => {
            __pewter_class_list_add_js(elem, value);
        }
    }
}

pub fn elem_remove_class(elem: &web_sys::Element, value: &DomStr<'_>) {
    match value {
        DomStr::Str(value) => {
            __pewter_class_list_remove_str(elem, value);
        }
        DomStr::String(value) => {
            __pewter_class_list_remove_str(elem, value);
        }
        DomStr::JsStr(value) => {
            __pewter_class_list_remove_js(elem, value);
        }
        DomStr::JsString(value) => {
            __pewter_class_list_remove_js(elem, value);
        }
    }
}

pub fn add_event_listener(target: &web_sys::EventTarget, event: Ev, listener: &js_sys::Function) {
    __pewter_add_event_listener(target, event.as_js_string(), listener);
}
