use super::{Fragment, Node};

/// A rendered piece of dom, ready to be attached to a parent element.
pub enum View {
    Empty,
    Node(Node),
    Fragment(Fragment),
}

impl Default for View {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<()> for View {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl View {
    pub(crate) fn attach(&self, parent: &web_sys::Element) {
        match self {
            Self::Empty => {}
            Self::Node(n) => {
                n.attach(parent);
            }
            Self::Fragment(f) => {
                for item in &f.items {
                    item.attach(parent);
                }
            }
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        if let Self::Node(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn into_node(self) -> Option<Node> {
        if let Self::Node(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Returns `true` if the view is [`Empty`].
    ///
    /// [`Empty`]: View::Empty
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether attaching this view would put anything into the document.
    pub fn has_content(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Node(_) => true,
            Self::Fragment(f) => f.items.iter().any(View::has_content),
        }
    }
}
