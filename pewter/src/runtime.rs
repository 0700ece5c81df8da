use std::{cell::RefCell, rc::Rc};

use futures::future::{AbortHandle, Abortable};

use crate::{app::ContextContainer, effect::EffectGuard};

/// The per-instance scope of a running application.
///
/// Holds the instance-scoped context container and makes it ambiently
/// reachable while the instance renders or one of its futures is polled.
/// Single-threaded wasm: the active slot is a plain static.
#[derive(Clone)]
pub(crate) struct Runtime {
    context: Rc<RefCell<ContextContainer>>,
}

static mut ACTIVE: Option<Runtime> = None;

impl Runtime {
    pub fn new() -> Self {
        Self {
            context: Rc::new(RefCell::new(ContextContainer::new())),
        }
    }

    pub fn register<T: 'static>(&self, value: T) {
        self.context.borrow_mut().register(value);
    }

    pub fn get_cloned<T: Clone + 'static>(&self) -> Option<T> {
        self.context.borrow().get::<T>().cloned()
    }

    /// Run `f` with this runtime as the active scope.
    pub fn with<O, F>(&self, f: F) -> O
    where
        F: FnOnce() -> O,
    {
        self.enter();
        let out = f();
        Self::leave();

        out
    }

    fn enter(&self) {
        unsafe {
            ACTIVE = Some(self.clone());
        }
    }

    fn leave() {
        unsafe {
            ACTIVE = None;
        }
    }

    pub fn current() -> Option<Runtime> {
        unsafe { ACTIVE.clone() }
    }

    /// Spawn a future tied to the currently active runtime (if any).
    /// Each poll re-enters the owning runtime's scope.
    pub fn spawn_abortable<F>(f: F) -> EffectGuard
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        let (handle, reg) = AbortHandle::new_pair();
        let f = Abortable::new(f, reg);

        let runtime = Self::current();
        wasm_bindgen_futures::spawn_local(async move {
            ScopedFuture::new(runtime, async move {
                f.await.ok();
            })
            .await;
        });

        EffectGuard::new(handle)
    }
}

pin_project_lite::pin_project! {
    struct ScopedFuture<F> {
        runtime: Option<Runtime>,
        #[pin]
        inner: F,
    }
}

impl<F> ScopedFuture<F> {
    fn new(runtime: Option<Runtime>, f: F) -> Self
    where
        F: std::future::Future,
    {
        Self { runtime, inner: f }
    }
}

impl<F> std::future::Future for ScopedFuture<F>
where
    F: std::future::Future,
{
    type Output = F::Output;

    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        let this = self.project();
        if let Some(runtime) = this.runtime {
            runtime.enter();
            let poll = this.inner.poll(cx);
            Runtime::leave();
            poll
        } else {
            this.inner.poll(cx)
        }
    }
}
