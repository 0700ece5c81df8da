//! The component contract the bootstrap consumes.
//!
//! A root definition is typically a component: a piece of state plus a
//! `render` producing the initial dom tree. The bootstrap only forces the
//! definition once, at mount time; everything after the first render is
//! driven by signals and [`Handle`] messages, not by this module.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::dom::{TagBuilder, View};

struct State<C> {
    state: Option<C>,
}

pub struct Context<'a, C> {
    state: &'a Rc<RefCell<State<C>>>,
}

impl<'a, C: Component> Context<'a, C> {
    pub fn handle(&self) -> Handle<C> {
        Handle(Rc::downgrade(self.state))
    }
}

/// A weak handle into a live component's state.
pub struct Handle<C: Component>(Weak<RefCell<State<C>>>);

impl<C: Component> Clone for Handle<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C: Component> Handle<C> {
    pub fn apply(&self, f: impl FnOnce(&mut C, Context<'_, C>)) {
        if let Some(state) = self.0.upgrade() {
            let mut borrow = state.borrow_mut();
            if let Some(data) = borrow.state.as_mut() {
                f(data, Context { state: &state });
            } else {
                #[cfg(debug_assertions)]
                tracing::warn!(
                    component=%std::any::type_name::<C>(),
                    "Tried to use handle of a component that is still initializing"
                );
            }
        } else {
            #[cfg(debug_assertions)]
            tracing::warn!(
                component=%std::any::type_name::<C>(),
                "Tried to use handle of a removed component"
            );
        }
    }
}

pub trait Component: Sized + 'static {
    type Properties;

    fn init(props: Self::Properties, ctx: Context<'_, Self>) -> Self;
    fn render(&mut self, ctx: Context<'_, Self>) -> TagBuilder;

    fn build(props: Self::Properties) -> View {
        build_component::<Self>(props)
    }
}

pub fn build_component<C: Component>(props: C::Properties) -> View {
    let comp = Rc::new(RefCell::new(State { state: None }));
    let mut state = C::init(props, Context { state: &comp });

    let mut tag = {
        let mut borrow = comp.borrow_mut();
        let tag = state.render(Context { state: &comp });
        borrow.state = Some(state);

        tag
    };

    // The component state lives exactly as long as its rendered node.
    tag.add_after_remove(move || {
        std::mem::drop(comp);
    });
    tag.into_view()
}
