// The `<head>` element and its slot ordering.
//
// Four singleton children live in fixed relative slots at the front of the
// head: base, title, charset meta, canonical link. A slot only occupies a
// position while it is set, so later slots shift down when earlier ones are
// absent. Everything else is inserted after the slots, grouped by category.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::ops::Deref;
use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

use crate::node::HtmlNode;

const VIEWPORT: &str = "width=device-width, initial-scale=1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Base,
    Title,
    Charset,
    Canonical,
}

const SLOTS: [Slot; 4] = [Slot::Base, Slot::Title, Slot::Charset, Slot::Canonical];

impl Slot {
    fn matches(self, node: &HtmlNode) -> bool {
        match self {
            Slot::Base => node.name() == "base",
            Slot::Title => node.name() == "title",
            Slot::Charset => node.name() == "meta" && node.has_attribute("charset"),
            Slot::Canonical => is_link_with_rel(node, "canonical"),
        }
    }

    fn create(self) -> HtmlNode {
        let (tag, rel) = match self {
            Slot::Base => ("base", None),
            Slot::Title => ("title", None),
            Slot::Charset => ("meta", None),
            Slot::Canonical => ("link", Some("canonical")),
        };
        let node = element(tag);
        if let Some(rel) = rel {
            node.set_attribute("rel", rel);
        }
        node
    }
}

fn element(tag: &'static str) -> HtmlNode {
    HtmlNode::element(tag)
}

fn is_link_with_rel(node: &HtmlNode, rel: &str) -> bool {
    node.name() == "link"
        && node
            .attribute("rel")
            .is_some_and(|r| r.trim().eq_ignore_ascii_case(rel))
}

fn is_css(node: &HtmlNode) -> bool {
    is_link_with_rel(node, "stylesheet")
}

fn is_js(node: &HtmlNode) -> bool {
    node.name() == "script"
}

fn is_alternate(node: &HtmlNode) -> bool {
    is_link_with_rel(node, "alternate")
}

/// A link that is not a slot, stylesheet or alternate.
fn is_plain_link(node: &HtmlNode) -> bool {
    node.name() == "link"
        && !Slot::Canonical.matches(node)
        && !is_css(node)
        && !is_alternate(node)
}

/// A short hex token derived from the clock and a random hasher seed.
/// Only meant to defeat browser caches.
fn cache_busting_version() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(nanos);
    format!("{:08x}", hasher.finish() as u32)
}

/// Append `key=version` to a URL's query string, ahead of any fragment.
fn with_cache_buster(href: &str, key: &str) -> String {
    let version = cache_busting_version();
    if let Ok(mut url) = Url::parse(href) {
        url.query_pairs_mut().append_pair(key, &version);
        return url.to_string();
    }
    let (path, fragment) = match href.find('#') {
        Some(hash) => href.split_at(hash),
        None => (href, ""),
    };
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={version}{fragment}")
}

fn apply_attributes(node: &HtmlNode, attrs: &[(&str, &str)], reserved: &[&str]) {
    for (name, value) in attrs {
        if reserved.iter().any(|r| r.eq_ignore_ascii_case(name.trim())) {
            continue;
        }
        node.set_attribute(name, value);
    }
}

/// A `<head>` element that keeps its singleton children in slot order.
///
/// Derefs to [`HtmlNode`] for reading and general attribute access. Use the
/// head's own methods to add children so the slot ordering holds.
///
/// # Examples
///
/// ```
/// use htmltree::HeadNode;
///
/// let head = HeadNode::new();
/// head.set_charset(Some("UTF-8"));
/// head.set_title(Some("Hi"));
/// head.set_base(Some("http://x/"));
/// let names: Vec<String> = head.children().iter().map(|c| c.name()).collect();
/// assert_eq!(names, ["base", "title", "meta", "meta"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadNode {
    node: HtmlNode,
}

impl Default for HeadNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for HeadNode {
    type Target = HtmlNode;

    fn deref(&self) -> &HtmlNode {
        &self.node
    }
}

impl HeadNode {
    /// A head carrying the standard `viewport` meta.
    pub fn new() -> Self {
        let head = Self::empty();
        head.add_meta("viewport", VIEWPORT, false);
        head
    }

    /// A head with no children.
    pub fn empty() -> Self {
        Self {
            node: element("head"),
        }
    }

    pub fn node(&self) -> &HtmlNode {
        &self.node
    }

    pub fn into_node(self) -> HtmlNode {
        self.node
    }

    // -----------------------------------------------------------------------
    // Slots
    // -----------------------------------------------------------------------

    fn slot_node(&self, slot: Slot) -> Option<HtmlNode> {
        self.node.children().into_iter().find(|c| slot.matches(c))
    }

    /// Position for `slot`: the number of earlier slots currently present.
    fn slot_index(&self, slot: Slot) -> usize {
        SLOTS
            .iter()
            .take_while(|s| **s != slot)
            .filter(|s| self.slot_node(**s).is_some())
            .count()
    }

    /// Number of leading children occupied by slots.
    fn slot_region(&self) -> usize {
        SLOTS
            .iter()
            .filter(|s| self.slot_node(**s).is_some())
            .count()
    }

    fn set_slot(&self, slot: Slot, value: Option<&str>, apply: impl FnOnce(&HtmlNode, &str)) -> bool {
        let Some(value) = value else {
            if let Some(existing) = self.slot_node(slot) {
                self.node.remove_child(&existing);
            }
            return true;
        };
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let node = match self.slot_node(slot) {
            Some(existing) => {
                debug!("replacing {:?} slot in place", slot);
                existing
            }
            None => {
                let created = slot.create();
                let index = self.slot_index(slot);
                if !self.node.insert(&created, index) {
                    return false;
                }
                created
            }
        };
        apply(&node, value);
        true
    }

    /// Set the `<base href>`; `None` removes it.
    pub fn set_base(&self, href: Option<&str>) -> bool {
        self.set_slot(Slot::Base, href, |node, href| {
            node.set_attribute("href", href);
        })
    }

    /// Set the `<title>` text; `None` removes it.
    pub fn set_title(&self, title: Option<&str>) -> bool {
        self.set_slot(Slot::Title, title, |node, title| {
            node.remove_all_children();
            node.add_text(title, true);
        })
    }

    /// Set `<meta charset>`; `None` removes it.
    pub fn set_charset(&self, charset: Option<&str>) -> bool {
        self.set_slot(Slot::Charset, charset, |node, charset| {
            node.set_attribute("charset", charset);
        })
    }

    /// Set `<link rel="canonical">`; `None` removes it.
    pub fn set_canonical(&self, href: Option<&str>) -> bool {
        self.set_slot(Slot::Canonical, href, |node, href| {
            node.set_attribute("href", href);
        })
    }

    pub fn base(&self) -> Option<String> {
        self.slot_node(Slot::Base)?.attribute("href")
    }

    pub fn title(&self) -> Option<String> {
        self.slot_node(Slot::Title).map(|t| t.text_content())
    }

    pub fn charset(&self) -> Option<String> {
        self.slot_node(Slot::Charset)?.attribute("charset")
    }

    pub fn canonical(&self) -> Option<String> {
        self.slot_node(Slot::Canonical)?.attribute("href")
    }

    /// The base href as an absolute URL, if it parses as one.
    pub fn base_url(&self) -> Option<Url> {
        Url::parse(&self.base()?).ok()
    }

    /// Resolve `raw` against the base URL; unresolvable input is returned
    /// unchanged.
    pub fn resolve_url(&self, raw: &str) -> String {
        if let Some(base) = self.base_url() {
            if let Ok(resolved) = base.join(raw) {
                return resolved.to_string();
            }
        }
        raw.to_string()
    }

    // -----------------------------------------------------------------------
    // Categorized children
    // -----------------------------------------------------------------------

    /// Insert after the last child matching `same_category`, or at the end;
    /// never inside the slot region.
    fn insert_in_category(&self, node: &HtmlNode, same_category: impl Fn(&HtmlNode) -> bool) -> bool {
        let children = self.node.children();
        let after_last = children
            .iter()
            .rposition(|c| same_category(c))
            .map_or(children.len(), |i| i + 1);
        let index = after_last.max(self.slot_region());
        self.node.insert(node, index)
    }

    /// The `<meta name=...>` child with this name (case-insensitive).
    pub fn meta(&self, name: &str) -> Option<HtmlNode> {
        let name = name.trim();
        self.node.children().into_iter().find(|c| {
            c.name() == "meta"
                && c.attribute("name")
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    pub fn has_meta(&self, name: &str) -> bool {
        self.meta(name).is_some()
    }

    /// Add `<meta name content>` after the last meta.
    ///
    /// An existing meta with the same name is updated only when
    /// `override_existing` is set; otherwise the call is a no-op.
    pub fn add_meta(&self, name: &str, content: &str, override_existing: bool) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if let Some(existing) = self.meta(name) {
            return override_existing && existing.set_attribute("content", content);
        }
        let meta = element("meta");
        if !meta.set_attribute("name", name) {
            return false;
        }
        meta.set_attribute("content", content);
        self.insert_in_category(&meta, |c| c.name() == "meta")
    }

    /// Add a stylesheet link after the last one. With `revision`, a `cv`
    /// cache-busting parameter is appended to `href`.
    pub fn add_css(&self, href: &str, attrs: &[(&str, &str)], revision: bool) -> bool {
        let href = href.trim();
        if href.is_empty() {
            return false;
        }
        let href = if revision {
            with_cache_buster(href, "cv")
        } else {
            href.to_string()
        };
        let link = element("link");
        link.set_attribute("rel", "stylesheet");
        link.set_attribute("href", &href);
        apply_attributes(&link, attrs, &["rel", "href"]);
        self.insert_in_category(&link, is_css)
    }

    /// Add a `<script src>` after the last script. With `revision`, a `jv`
    /// cache-busting parameter is appended to `src`.
    pub fn add_js(&self, src: &str, attrs: &[(&str, &str)], revision: bool) -> bool {
        let src = src.trim();
        if src.is_empty() {
            return false;
        }
        let src = if revision {
            with_cache_buster(src, "jv")
        } else {
            src.to_string()
        };
        let script = element("script");
        script.set_attribute("src", &src);
        apply_attributes(&script, attrs, &["src"]);
        self.insert_in_category(&script, is_js)
    }

    /// Add a generic `<link rel href>` after the last generic link.
    ///
    /// `canonical`, `stylesheet` and `alternate` have their own methods and
    /// are rejected here.
    pub fn add_link(&self, rel: &str, href: &str, attrs: &[(&str, &str)]) -> bool {
        let rel = rel.trim().to_ascii_lowercase();
        let href = href.trim();
        if rel.is_empty() || href.is_empty() {
            return false;
        }
        if matches!(rel.as_str(), "canonical" | "stylesheet" | "alternate") {
            trace!("add_link refuses rel={}", rel);
            return false;
        }
        let link = element("link");
        link.set_attribute("rel", &rel);
        link.set_attribute("href", href);
        apply_attributes(&link, attrs, &["rel", "href"]);
        self.insert_in_category(&link, is_plain_link)
    }

    /// Add `<link rel="alternate" hreflang href>` after the last alternate.
    pub fn add_alternate(&self, href: &str, lang: &str, attrs: &[(&str, &str)]) -> bool {
        let href = href.trim();
        let lang = lang.trim();
        if href.is_empty() || lang.is_empty() {
            return false;
        }
        let link = element("link");
        link.set_attribute("rel", "alternate");
        link.set_attribute("hreflang", lang);
        link.set_attribute("href", href);
        apply_attributes(&link, attrs, &["rel", "hreflang", "href"]);
        self.insert_in_category(&link, is_alternate)
    }

    pub fn css_nodes(&self) -> Vec<HtmlNode> {
        self.node.children().into_iter().filter(is_css).collect()
    }

    pub fn js_nodes(&self) -> Vec<HtmlNode> {
        self.node.children().into_iter().filter(is_js).collect()
    }

    pub fn link_nodes(&self) -> Vec<HtmlNode> {
        self.node.children().into_iter().filter(is_plain_link).collect()
    }

    pub fn alternates(&self) -> Vec<HtmlNode> {
        self.node.children().into_iter().filter(is_alternate).collect()
    }

    // -----------------------------------------------------------------------
    // Generic children
    // -----------------------------------------------------------------------

    fn accepts(&self, child: &HtmlNode) -> bool {
        if SLOTS.iter().any(|s| s.matches(child)) || matches!(child.name().as_str(), "base" | "title") {
            trace!("slot nodes go through the head setters");
            return false;
        }
        if child.name() == "meta" {
            if let Some(name) = child.attribute("name") {
                return !self.has_meta(&name);
            }
        }
        true
    }

    /// Append a child after the slots. Slot nodes (`base`, `title`, charset
    /// meta, canonical link) and metas whose name is already present are
    /// rejected.
    pub fn add_child(&self, child: &HtmlNode) -> bool {
        self.accepts(child) && self.node.add_child(child)
    }

    /// Insert a child at `position`, which must lie after the slots.
    pub fn insert(&self, child: &HtmlNode, position: usize) -> bool {
        position >= self.slot_region() && self.accepts(child) && self.node.insert(child, position)
    }
}
