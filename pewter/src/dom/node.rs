use std::marker::PhantomData;

use futures::Future;
use futures_signals::signal::{Signal, SignalExt};
use js_sys::JsString;
use wasm_bindgen::JsCast;

use crate::{
    effect::EffectGuard,
    runtime::Runtime,
    web::{
        self, create_element, create_text, elem_add_class, elem_remove_class, empty_string,
        remove_attr, set_attribute, set_text_data, DomStr,
    },
};

use super::{Attr, DomEvent, Ev, Tag, View};

pub struct Fragment {
    pub items: Vec<View>,
}

impl From<Fragment> for View {
    fn from(f: Fragment) -> Self {
        Self::Fragment(f)
    }
}

/// A live dom node together with the cleanup state it owns: callbacks to
/// run on removal, guards for signal-driven futures, and retained child
/// nodes.
pub struct Node {
    node: web_sys::Node,
    after_remove: Vec<Box<dyn FnOnce()>>,
    guards: Vec<EffectGuard>,

    children: Vec<Node>,
}

impl Node {
    #[inline]
    pub fn node(&self) -> &web_sys::Node {
        &self.node
    }

    pub(crate) fn attach(&self, parent: &web_sys::Element) {
        parent.append_child(&self.node).unwrap();
    }

    pub fn new_text(value: DomStr<'_>) -> Self {
        let text = web::create_text(value);
        Self {
            node: text.into(),
            after_remove: Vec::new(),
            guards: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add_after_remove<F: FnOnce() + 'static>(&mut self, f: F) {
        self.after_remove.push(Box::new(f));
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        for callback in self.after_remove.drain(..) {
            callback();
        }
    }
}

impl From<Node> for View {
    fn from(n: Node) -> Self {
        Self::Node(n)
    }
}

pub struct TagBuilder<T = ()> {
    pub(crate) node: Node,
    _marker: PhantomData<T>,
}

impl TagBuilder<()> {
    pub fn new(tag: Tag) -> Self {
        let elem = create_element(tag);
        Self {
            node: Node {
                node: elem.into(),
                after_remove: Vec::new(),
                guards: Vec::new(),
                children: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    #[doc(hidden)]
    pub fn from_node(node: Node) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    pub fn elem(&self) -> &web_sys::Element {
        self.node.node.unchecked_ref()
    }

    /// Tie a future to this node. It is polled inside the owning
    /// application's runtime scope and aborted when the node is removed.
    pub fn register_future<F: Future<Output = ()> + 'static>(&mut self, f: F) {
        let guard = Runtime::spawn_abortable(f);
        self.node.guards.push(guard);
    }

    pub fn add_after_remove<F: FnOnce() + 'static>(&mut self, f: F) {
        self.node.add_after_remove(f);
    }

    #[inline]
    pub fn after_remove<F: FnOnce() + 'static>(mut self, f: F) -> Self {
        self.add_after_remove(f);
        self
    }

    /// Keep `value` alive for as long as this node is in the document.
    pub fn add_bind<V: 'static>(&mut self, value: V) {
        self.add_after_remove(move || {
            std::mem::drop(value);
        });
    }

    pub fn bind<V: 'static>(mut self, value: V) -> Self {
        self.add_bind(value);
        self
    }

    // Attributes.

    pub fn add_attr<'a, I: Into<DomStr<'a>>>(&mut self, attr: Attr, value: I) {
        set_attribute(self.elem(), attr, value.into());
    }

    pub fn attr<'a, I: Into<DomStr<'a>>>(self, attr: Attr, value: I) -> Self {
        set_attribute(self.elem(), attr, value.into());
        self
    }

    pub fn add_attr_signal<V, S>(&mut self, attr: Attr, signal: S)
    where
        V: Into<DomStr<'static>>,
        S: Signal<Item = V> + 'static,
    {
        let elem = self.elem().clone();
        let f = signal.for_each(move |value| {
            set_attribute(&elem, attr, value.into());
            async {}
        });
        self.register_future(f);
    }

    #[inline]
    pub fn attr_signal<V, S>(mut self, attr: Attr, signal: S) -> Self
    where
        V: Into<DomStr<'static>>,
        S: Signal<Item = V> + 'static,
    {
        self.add_attr_signal(attr, signal);
        self
    }

    pub fn add_attr_signal_toggle<S>(&mut self, attr: Attr, signal: S)
    where
        S: Signal<Item = bool> + 'static,
    {
        let elem = self.elem().clone();
        let f = signal.for_each(move |flag| {
            if flag {
                set_attribute(&elem, attr, empty_string().into());
            } else {
                remove_attr(&elem, attr);
            }
            async {}
        });
        self.register_future(f);
    }

    // Class.

    pub fn add_class<'a, I>(&mut self, class: I)
    where
        I: Into<DomStr<'a>>,
    {
        let value = class.into();
        elem_add_class(self.elem(), &value);
    }

    #[inline]
    pub fn class<'a, I>(mut self, class: I) -> Self
    where
        I: Into<DomStr<'a>>,
    {
        self.add_class(class);
        self
    }

    pub fn class_if<'a, I>(mut self, flag: bool, class: I) -> Self
    where
        I: Into<DomStr<'a>>,
    {
        if flag {
            self.add_class(class);
        }
        self
    }

    pub fn add_class_signal_toggle<I, S>(&mut self, class: I, signal: S)
    where
        I: Into<DomStr<'static>>,
        S: Signal<Item = bool> + 'static,
    {
        let class = class.into();

        let elem = self.elem().clone();
        let mut is_added = false;
        self.register_future(signal.for_each(move |flag| {
            if flag {
                if !is_added {
                    elem_add_class(&elem, &class);
                    is_added = true;
                }
            } else if is_added {
                elem_remove_class(&elem, &class);
                is_added = false;
            }
            async {}
        }));
    }

    #[inline]
    pub fn class_signal_toggle<I, S>(mut self, class: I, signal: S) -> Self
    where
        I: Into<DomStr<'static>>,
        S: Signal<Item = bool> + 'static,
    {
        self.add_class_signal_toggle(class, signal);
        self
    }

    // Text.

    pub fn add_text(&mut self, value: DomStr<'_>) {
        let text = create_text(value);
        self.node.node.append_child(&text).unwrap();
    }

    #[inline]
    pub fn text<'a, S>(mut self, value: S) -> Self
    where
        S: Into<DomStr<'a>>,
    {
        self.add_text(value.into());
        self
    }

    pub fn add_text_signal<V, S>(&mut self, signal: S)
    where
        V: Into<DomStr<'static>>,
        S: Signal<Item = V> + 'static,
    {
        let text = create_text("".into());
        self.node.node.append_child(&text).unwrap();

        let f = signal.for_each(move |value| {
            set_text_data(&text, &value.into());
            async {}
        });
        self.register_future(f);
    }

    #[inline]
    pub fn text_signal<V, S>(mut self, signal: S) -> Self
    where
        V: Into<DomStr<'static>>,
        S: Signal<Item = V> + 'static,
    {
        self.add_text_signal(signal);
        self
    }

    // Events.

    pub fn add_event_listener<F>(&mut self, event: Ev, mut handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |event: web_sys::Event| {
                handler(event);
            }) as Box<dyn FnMut(web_sys::Event)>);

        web::add_event_listener(self.elem(), event, callback.as_ref().unchecked_ref());
        self.node.after_remove.push(Box::new(move || {
            std::mem::drop(callback);
        }));
    }

    pub fn add_dom_event_listener<E, F>(&mut self, mut handler: F)
    where
        E: DomEvent,
        F: FnMut(E) + 'static,
    {
        self.add_event_listener(E::event_type(), move |raw_event| {
            if let Some(event) = E::from_dom(raw_event) {
                handler(event);
            }
        });
    }

    pub fn on<E, F>(mut self, handler: F) -> Self
    where
        E: DomEvent,
        F: FnMut(E) + 'static,
    {
        self.add_dom_event_listener(handler);
        self
    }

    pub fn on_event<F>(mut self, event: Ev, handler: F) -> Self
    where
        F: Fn(web_sys::Event) + 'static,
    {
        self.add_event_listener(event, handler);
        self
    }

    // Children.

    pub fn add_node(&mut self, node: Node) {
        self.node.node.append_child(&node.node).unwrap();
        self.node.children.push(node);
    }

    #[inline]
    pub fn add_child(&mut self, child: TagBuilder) {
        self.add_node(child.node);
    }

    pub fn child(mut self, child: TagBuilder) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_view(&mut self, view: View) {
        match view {
            View::Empty => {}
            View::Node(n) => {
                n.attach(self.elem());
                self.node.children.push(n);
            }
            View::Fragment(f) => {
                for item in f.items {
                    self.add_view(item);
                }
            }
        }
    }

    pub fn and<A: Apply>(mut self, item: A) -> Self {
        item.apply(&mut self);
        self
    }

    pub fn add_iter<A: Apply, I: IntoIterator<Item = A>>(&mut self, iter: I) {
        for item in iter {
            item.apply(self);
        }
    }

    #[inline]
    pub fn and_iter<A: Apply, I: IntoIterator<Item = A>>(mut self, iter: I) -> Self {
        self.add_iter(iter);
        self
    }

    #[inline]
    pub fn build(self) -> Node {
        self.node
    }

    #[inline]
    pub fn into_view(self) -> View {
        View::Node(self.build())
    }
}

impl From<TagBuilder> for View {
    fn from(t: TagBuilder) -> Self {
        Self::Node(t.build())
    }
}

pub trait Render {
    fn render(self) -> View;
}

impl<R: Render> Apply for R {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_view(self.render());
    }
}

pub trait Apply {
    fn apply(self, tag: &mut TagBuilder);
}

impl<'a> Apply for &'a str {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_text(self.into());
    }
}

impl<'a> Apply for &'a JsString {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_text(self.into());
    }
}

impl<'a> Apply for &'a String {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_text(self.into());
    }
}

impl Apply for String {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_text(self.into());
    }
}

impl<'a> Apply for DomStr<'a> {
    fn apply(self, tag: &mut TagBuilder) {
        tag.add_text(self);
    }
}

impl Render for Node {
    fn render(self) -> View {
        View::Node(self)
    }
}

impl Render for TagBuilder {
    fn render(self) -> View {
        self.node.render()
    }
}

impl Render for View {
    fn render(self) -> View {
        self
    }
}

impl Apply for Fragment {
    fn apply(self, tag: &mut TagBuilder) {
        for item in self.items {
            item.apply(tag);
        }
    }
}

impl<I> Apply for Option<I>
where
    I: Apply,
{
    fn apply(self, tag: &mut TagBuilder) {
        if let Some(inner) = self {
            inner.apply(tag);
        }
    }
}

impl<A1: Apply, A2: Apply> Apply for (A1, A2) {
    fn apply(self, tag: &mut TagBuilder) {
        self.0.apply(tag);
        self.1.apply(tag);
    }
}

impl<A1: Apply, A2: Apply, A3: Apply> Apply for (A1, A2, A3) {
    fn apply(self, tag: &mut TagBuilder) {
        self.0.apply(tag);
        self.1.apply(tag);
        self.2.apply(tag);
    }
}

impl<A1: Apply, A2: Apply, A3: Apply, A4: Apply> Apply for (A1, A2, A3, A4) {
    fn apply(self, tag: &mut TagBuilder) {
        self.0.apply(tag);
        self.1.apply(tag);
        self.2.apply(tag);
        self.3.apply(tag);
    }
}

pub mod builder {
    use super::{Tag, TagBuilder};

    #[inline]
    pub fn tag(tag: Tag) -> TagBuilder {
        TagBuilder::new(tag)
    }

    #[inline]
    pub fn a() -> TagBuilder {
        TagBuilder::new(Tag::A)
    }

    #[inline]
    pub fn button() -> TagBuilder {
        TagBuilder::new(Tag::Button)
    }

    #[inline]
    pub fn div() -> TagBuilder {
        TagBuilder::new(Tag::Div)
    }

    #[inline]
    pub fn h1() -> TagBuilder {
        TagBuilder::new(Tag::H1)
    }

    #[inline]
    pub fn input() -> TagBuilder {
        TagBuilder::new(Tag::Input)
    }

    #[inline]
    pub fn li() -> TagBuilder {
        TagBuilder::new(Tag::Li)
    }

    #[inline]
    pub fn nav() -> TagBuilder {
        TagBuilder::new(Tag::Nav)
    }

    #[inline]
    pub fn p() -> TagBuilder {
        TagBuilder::new(Tag::P)
    }

    #[inline]
    pub fn span() -> TagBuilder {
        TagBuilder::new(Tag::Span)
    }

    #[inline]
    pub fn ul() -> TagBuilder {
        TagBuilder::new(Tag::Ul)
    }
}
