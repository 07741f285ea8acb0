//! Browser handle shared by the widgets of one view.

use anyhow::Result;
use parking_lot::Mutex;
use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    browser::{Browser, Element, Locator},
    error::WidgetError,
};

/// Browser session plus the widget cache of a single view instance.
///
/// Clones share the cache, so every widget of a view sees the same resolved
/// elements until [`Page::flush_widget_cache`] is called. Only top-level
/// lookups are cached; lookups scoped to a parent element always hit the
/// browser.
#[derive(Clone)]
pub struct Page {
    browser: Arc<dyn Browser>,
    cache: Arc<Mutex<HashMap<Locator, Vec<Element>>>>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.cache.lock().len();
        f.debug_struct("Page").field("cached", &cached).finish()
    }
}

impl Page {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self {
            browser,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn browser(&self) -> &Arc<dyn Browser> {
        &self.browser
    }

    pub async fn elements(&self, locator: &Locator) -> Result<Vec<Element>> {
        let cached = self.cache.lock().get(locator).cloned();
        if let Some(elements) = cached {
            return Ok(elements);
        }

        let found = self.browser.find_elements(locator, None).await?;
        if !found.is_empty() {
            self.cache.lock().insert(locator.clone(), found.clone());
        }
        Ok(found)
    }

    pub async fn element(&self, locator: &Locator) -> Result<Element> {
        self.elements(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                WidgetError::NoSuchElement {
                    locator: locator.clone(),
                }
                .into()
            })
    }

    pub async fn is_present(&self, locator: &Locator) -> Result<bool> {
        Ok(!self.elements(locator).await?.is_empty())
    }

    pub async fn children(&self, parent: &Element, locator: &Locator) -> Result<Vec<Element>> {
        self.browser.find_elements(locator, Some(parent)).await
    }

    pub async fn child(&self, parent: &Element, locator: &Locator) -> Result<Element> {
        self.children(parent, locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                WidgetError::NoSuchElement {
                    locator: locator.clone(),
                }
                .into()
            })
    }

    /// Visible text of `element`, trimmed.
    pub async fn text(&self, element: &Element) -> Result<String> {
        Ok(self.browser.text(element).await?.trim().to_string())
    }

    pub async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        self.browser.attribute(element, name).await
    }

    pub async fn has_class(&self, element: &Element, class: &str) -> Result<bool> {
        Ok(self
            .attribute(element, "class")
            .await?
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false))
    }

    pub async fn click(&self, element: &Element) -> Result<()> {
        self.browser.click(element).await
    }

    /// Replace the content of an input element.
    pub async fn fill(&self, element: &Element, text: &str) -> Result<()> {
        self.browser.clear(element).await?;
        self.browser.send_keys(element, text).await
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.browser.goto(url).await?;
        self.flush_widget_cache();
        Ok(())
    }

    pub async fn refresh(&self) -> Result<()> {
        self.browser.refresh().await?;
        self.flush_widget_cache();
        Ok(())
    }

    pub fn flush_widget_cache(&self) {
        let mut cache = self.cache.lock();
        if !cache.is_empty() {
            log::debug!("Flushing {} cached widget lookup(s)", cache.len());
        }
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBrowser {
        lookups: AtomicUsize,
        refreshes: AtomicUsize,
    }

    #[async_trait]
    impl Browser for CountingBrowser {
        async fn goto(&self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn refresh(&self) -> Result<()> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn find_elements(
            &self,
            locator: &Locator,
            _parent: Option<&Element>,
        ) -> Result<Vec<Element>> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            if locator.as_str().contains("missing") {
                return Ok(vec![]);
            }
            Ok(vec![Element::new(format!("el-{n}"))])
        }

        async fn text(&self, element: &Element) -> Result<String> {
            Ok(format!("  {}  ", element.id()))
        }

        async fn attribute(&self, _element: &Element, name: &str) -> Result<Option<String>> {
            Ok((name == "class").then(|| "btn active".to_string()))
        }

        async fn click(&self, _element: &Element) -> Result<()> {
            Ok(())
        }

        async fn send_keys(&self, _element: &Element, _text: &str) -> Result<()> {
            Ok(())
        }

        async fn clear(&self, _element: &Element) -> Result<()> {
            Ok(())
        }

        async fn handle_alert(&self, _accept: bool) -> Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_top_level_lookups_are_cached_until_flush() -> Result<()> {
        let browser = Arc::new(CountingBrowser::default());
        let page = Page::new(browser.clone());
        let title = Locator::xpath("//h1");

        let first = page.element(&title).await?;
        let second = page.element(&title).await?;
        assert_eq!(first, second);
        assert_eq!(browser.lookups.load(Ordering::SeqCst), 1);

        page.flush_widget_cache();
        let third = page.element(&title).await?;
        assert_ne!(first, third);
        assert_eq!(browser.lookups.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_clones_share_cache_and_refresh_flushes() -> Result<()> {
        let browser = Arc::new(CountingBrowser::default());
        let page = Page::new(browser.clone());
        let shared = page.clone();
        let title = Locator::xpath("//h1");

        page.element(&title).await?;
        shared.element(&title).await?;
        assert_eq!(browser.lookups.load(Ordering::SeqCst), 1);

        shared.refresh().await?;
        page.element(&title).await?;
        assert_eq!(browser.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(browser.lookups.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_element_and_scoped_lookups() -> Result<()> {
        let browser = Arc::new(CountingBrowser::default());
        let page = Page::new(browser.clone());

        let err = page
            .element(&Locator::xpath("//missing"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WidgetError>(),
            Some(WidgetError::NoSuchElement { .. })
        ));
        assert!(!page.is_present(&Locator::xpath("//missing")).await?);

        let parent = page.element(&Locator::xpath("//table")).await?;
        let before = browser.lookups.load(Ordering::SeqCst);
        page.child(&parent, &Locator::xpath("./tr")).await?;
        page.child(&parent, &Locator::xpath("./tr")).await?;
        assert_eq!(browser.lookups.load(Ordering::SeqCst), before + 2);

        assert_eq!(page.text(&parent).await?, parent.id());
        assert!(page.has_class(&parent, "active").await?);
        assert!(!page.has_class(&parent, "act").await?);
        Ok(())
    }
}
