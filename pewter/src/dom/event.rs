use wasm_bindgen::JsCast;

make_str_enum! {
    Ev {
        Change = "change",
        Click = "click",
        Input = "input",
        KeyDown = "keydown",
        PopState = "popstate",
        Submit = "submit",
    }
}

pub trait DomEvent: Sized {
    fn event_type() -> Ev;
    fn from_dom(ev: web_sys::Event) -> Option<Self>;
}

// ClickEvent.

pub struct ClickEvent(pub web_sys::MouseEvent);

impl std::ops::Deref for ClickEvent {
    type Target = web_sys::MouseEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DomEvent for ClickEvent {
    fn event_type() -> Ev {
        Ev::Click
    }

    fn from_dom(ev: web_sys::Event) -> Option<Self> {
        ev.dyn_into().ok().map(Self)
    }
}

// InputEvent.

pub struct InputEvent(pub web_sys::InputEvent);

impl InputEvent {
    pub fn value(&self) -> Option<String> {
        let target = self.0.current_target()?;

        if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
            Some(input.value())
        } else if let Some(textarea) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            Some(textarea.value())
        } else if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
            Some(select.value())
        } else {
            None
        }
    }
}

impl std::ops::Deref for InputEvent {
    type Target = web_sys::InputEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DomEvent for InputEvent {
    fn event_type() -> Ev {
        Ev::Input
    }

    fn from_dom(ev: web_sys::Event) -> Option<Self> {
        ev.dyn_into().ok().map(Self)
    }
}

// KeyDownEvent.

pub struct KeyDownEvent(pub web_sys::KeyboardEvent);

impl std::ops::Deref for KeyDownEvent {
    type Target = web_sys::KeyboardEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DomEvent for KeyDownEvent {
    fn event_type() -> Ev {
        Ev::KeyDown
    }

    fn from_dom(ev: web_sys::Event) -> Option<Self> {
        ev.dyn_into().ok().map(Self)
    }
}
