//! Views: groups of widgets describing one state of a page.

use anyhow::Result;
use async_trait::async_trait;
use std::any::Any;

use crate::page::Page;

/// Upcast helper so boxed views can be turned back into their concrete type.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

#[async_trait]
pub trait View: AsAny {
    fn page(&self) -> &Page;

    /// Whether the browser currently shows this view. Reads only, so it is
    /// safe to poll.
    async fn is_displayed(&self) -> Result<bool>;

    fn flush_widget_cache(&self) {
        self.page().flush_widget_cache();
    }
}

pub fn downcast_view<V: View>(view: Box<dyn View>) -> Option<V> {
    view.into_any().downcast::<V>().ok().map(|view| *view)
}

pub fn view_ref<V: View>(view: &dyn View) -> Option<&V> {
    view.as_any().downcast_ref::<V>()
}
