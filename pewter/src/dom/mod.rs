mod attribute;
mod event;
mod node;
mod tag;
mod view;

pub use self::{
    attribute::Attr,
    event::{ClickEvent, DomEvent, Ev, InputEvent, KeyDownEvent},
    node::{builder, Apply, Fragment, Node, Render, TagBuilder},
    tag::Tag,
    view::View,
};
