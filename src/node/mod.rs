// HTML node tree.
//
// Nodes are reference-counted handles with a weak back-reference to their
// parent, the same ownership shape as `markup5ever_rcdom`: a parent's child
// list owns its children, and a child only observes its parent. Cloning an
// `HtmlNode` clones the handle, not the subtree.

pub(crate) mod attributes;
pub(crate) mod names;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

pub use attributes::{parse_style, render_style, Attributes};
pub use names::{is_preformatted_element, is_valid_name, is_void_element};

use crate::error::HtmlTreeError;
use crate::serialize::escape;
use crate::serialize::{self, HighlightOptions, SerializeOptions};
use names::{COMMENT_NAME, TEXT_NAME};

/// Element payload: tag name, attributes and serialization override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Attributes,
    pub(crate) format_override: Option<bool>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }
}

/// Payload of a text or comment leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    pub(crate) raw: String,
    pub(crate) escape: bool,
}

impl TextData {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether `<`, `>` and `&` are escaped on output.
    pub fn is_escaped(&self) -> bool {
        self.escape
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(TextData),
    Comment(TextData),
}

struct NodeCell {
    kind: RefCell<NodeKind>,
    parent: RefCell<Weak<NodeCell>>,
    children: RefCell<Vec<HtmlNode>>,
}

// Unlink descendants iteratively so dropping a deep tree cannot overflow
// the stack.
impl Drop for NodeCell {
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.children.get_mut());
        while let Some(node) = pending.pop() {
            if let Ok(mut cell) = Rc::try_unwrap(node.0) {
                pending.append(cell.children.get_mut());
            }
        }
    }
}

/// A handle to a node in an HTML tree.
///
/// Equality is identity: two handles are equal when they point at the same
/// node.
///
/// # Examples
///
/// ```
/// use htmltree::HtmlNode;
///
/// let div = HtmlNode::new("div").unwrap();
/// let p = HtmlNode::new("p").unwrap();
/// assert!(p.add_text("hi", true));
/// assert!(div.add_child(&p));
/// assert_eq!(div.to_html(false), "<div><p>hi</p></div>");
/// ```
#[derive(Clone)]
pub struct HtmlNode(Rc<NodeCell>);

impl HtmlNode {
    fn from_kind(kind: NodeKind) -> Self {
        Self(Rc::new(NodeCell {
            kind: RefCell::new(kind),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Create an element node.
    ///
    /// `#text` and `#comment` (any case) create empty leaf nodes instead.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlTreeError::InvalidNodeName`] if `name` is empty or not a
    /// valid tag name.
    pub fn new(name: &str) -> Result<Self, HtmlTreeError> {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case(TEXT_NAME) {
            return Ok(Self::text("", true));
        }
        if trimmed.eq_ignore_ascii_case(COMMENT_NAME) {
            return Ok(Self::comment(""));
        }
        if !is_valid_name(trimmed) {
            return Err(HtmlTreeError::InvalidNodeName(name.to_string()));
        }
        Ok(Self::from_kind(NodeKind::Element(Element {
            name: trimmed.to_ascii_lowercase(),
            attributes: Attributes::new(),
            format_override: None,
        })))
    }

    /// Create a text leaf. With `escape`, `<`, `>` and `&` are written as
    /// entities when serialized.
    pub fn text(text: &str, escape: bool) -> Self {
        Self::from_kind(NodeKind::Text(TextData {
            raw: text.to_string(),
            escape,
        }))
    }

    /// Create a comment leaf.
    pub fn comment(text: &str) -> Self {
        Self::from_kind(NodeKind::Comment(TextData {
            raw: text.to_string(),
            escape: true,
        }))
    }

    /// Element with a known-good lowercase tag name.
    pub(crate) fn element(name: &'static str) -> Self {
        debug_assert!(is_valid_name(name));
        Self::from_kind(NodeKind::Element(Element {
            name: name.to_string(),
            attributes: Attributes::new(),
            format_override: None,
        }))
    }

    pub(crate) fn kind(&self) -> Ref<'_, NodeKind> {
        self.0.kind.borrow()
    }

    fn kind_mut(&self) -> RefMut<'_, NodeKind> {
        self.0.kind.borrow_mut()
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &HtmlNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // -----------------------------------------------------------------------
    // Kind queries
    // -----------------------------------------------------------------------

    /// Tag name, or `#text` / `#comment` for leaves.
    pub fn name(&self) -> String {
        match &*self.kind() {
            NodeKind::Element(el) => el.name.clone(),
            NodeKind::Text(_) => TEXT_NAME.to_string(),
            NodeKind::Comment(_) => COMMENT_NAME.to_string(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(&*self.kind(), NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(&*self.kind(), NodeKind::Text(_))
    }

    pub fn is_comment(&self) -> bool {
        matches!(&*self.kind(), NodeKind::Comment(_))
    }

    /// Text and comment nodes are leaves.
    pub fn is_leaf(&self) -> bool {
        !self.is_element()
    }

    pub fn is_void(&self) -> bool {
        matches!(&*self.kind(), NodeKind::Element(el) if el.is_void())
    }

    /// Whether children may be attached (non-void elements only).
    pub fn accepts_children(&self) -> bool {
        matches!(&*self.kind(), NodeKind::Element(el) if !el.is_void())
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    /// Set an attribute with a value.
    ///
    /// Returns `false` without changing anything if this is a leaf, the name
    /// is empty or invalid, or the value is not allowed for the attribute:
    /// `dir` only accepts `ltr` / `rtl`, and a `style` value must contain at
    /// least one well-formed declaration. Style values are stored normalized
    /// as `key:value;`.
    ///
    /// ```
    /// use htmltree::HtmlNode;
    ///
    /// let div = HtmlNode::new("div").unwrap();
    /// assert!(div.set_attribute("ID", "main"));
    /// assert_eq!(div.attribute("id").as_deref(), Some("main"));
    /// assert!(!div.set_attribute("dir", "up"));
    /// ```
    pub fn set_attribute(&self, name: &str, value: &str) -> bool {
        self.put_attribute(name, Some(value))
    }

    /// Set a valueless attribute such as `disabled`.
    pub fn set_boolean_attribute(&self, name: &str) -> bool {
        self.put_attribute(name, None)
    }

    fn put_attribute(&self, name: &str, value: Option<&str>) -> bool {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() || !is_valid_name(&name) {
            trace!("rejected attribute name {:?}", name);
            return false;
        }
        let value = match (name.as_str(), value) {
            ("dir", Some(v)) => {
                let v = v.trim().to_ascii_lowercase();
                if v != "ltr" && v != "rtl" {
                    trace!("rejected dir value {:?}", v);
                    return false;
                }
                Some(v)
            }
            ("dir", None) => return false,
            ("style", Some(v)) => {
                let props = parse_style(v);
                if props.is_empty() {
                    return false;
                }
                Some(render_style(&props))
            }
            (_, v) => v.map(str::to_string),
        };
        match &mut *self.kind_mut() {
            NodeKind::Element(el) => {
                el.attributes.insert(&name, value);
                true
            }
            _ => false,
        }
    }

    /// Attribute value. Valueless attributes read as an empty string.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.kind() {
            NodeKind::Element(el) => el
                .attributes
                .get(name)
                .map(|v| v.unwrap_or_default().to_string()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        match &*self.kind() {
            NodeKind::Element(el) => el.attributes.contains(name),
            _ => false,
        }
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove_attribute(&self, name: &str) -> bool {
        match &mut *self.kind_mut() {
            NodeKind::Element(el) => el.attributes.remove(name.trim()).is_some(),
            _ => false,
        }
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, Option<String>)> {
        match &*self.kind() {
            NodeKind::Element(el) => el.attributes.to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn set_id(&self, id: &str) -> bool {
        self.set_attribute("id", id)
    }

    pub fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    pub fn set_class_name(&self, class: &str) -> bool {
        self.set_attribute("class", class)
    }

    pub fn set_writing_dir(&self, dir: &str) -> bool {
        self.set_attribute("dir", dir)
    }

    pub fn set_tab_index(&self, index: i32) -> bool {
        self.set_attribute("tabindex", &index.to_string())
    }

    /// Merge style properties into the `style` attribute; new values win.
    pub fn set_style(&self, props: &[(&str, &str)]) -> bool {
        let mut merged = self.style();
        for (key, value) in props {
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            attributes::push_style_prop(&mut merged, key, value.to_string());
        }
        if merged.is_empty() {
            return false;
        }
        self.set_attribute("style", &render_style(&merged))
    }

    /// Parsed `style` properties in declaration order.
    pub fn style(&self) -> Vec<(String, String)> {
        self.attribute("style")
            .map(|s| parse_style(&s))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Serialization override
    // -----------------------------------------------------------------------

    /// Force formatted (`Some(true)`) or compact (`Some(false)`) output for
    /// this element's subtree. Ignored on leaves.
    pub fn set_format_override(&self, formatted: Option<bool>) -> bool {
        match &mut *self.kind_mut() {
            NodeKind::Element(el) => {
                el.format_override = formatted;
                true
            }
            _ => false,
        }
    }

    pub fn format_override(&self) -> Option<bool> {
        match &*self.kind() {
            NodeKind::Element(el) => el.format_override,
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Leaf text
    // -----------------------------------------------------------------------

    /// Text as supplied, for text and comment nodes.
    pub fn raw_text(&self) -> Option<String> {
        match &*self.kind() {
            NodeKind::Text(t) | NodeKind::Comment(t) => Some(t.raw.clone()),
            NodeKind::Element(_) => None,
        }
    }

    /// Text as written to output: entity-escaped text, or a comment body with
    /// its delimiters neutralized.
    pub fn display_text(&self) -> Option<String> {
        match &*self.kind() {
            NodeKind::Text(t) if t.escape => Some(escape::escape_text(&t.raw)),
            NodeKind::Text(t) => Some(t.raw.clone()),
            NodeKind::Comment(t) => Some(escape::neutralize_comment(&t.raw)),
            NodeKind::Element(_) => None,
        }
    }

    /// Replace a leaf's text. `escape` is ignored for comments.
    pub fn set_text(&self, text: &str, escape: bool) -> bool {
        match &mut *self.kind_mut() {
            NodeKind::Text(t) => {
                t.raw = text.to_string();
                t.escape = escape;
                true
            }
            NodeKind::Comment(t) => {
                t.raw = text.to_string();
                true
            }
            NodeKind::Element(_) => false,
        }
    }

    /// Concatenated raw text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &*self.kind() {
            NodeKind::Text(t) => out.push_str(&t.raw),
            NodeKind::Comment(_) => {}
            NodeKind::Element(_) => {
                for child in self.0.children.borrow().iter() {
                    child.collect_text(out);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn parent(&self) -> Option<HtmlNode> {
        self.0.parent.borrow().upgrade().map(HtmlNode)
    }

    /// Snapshot of the child list.
    pub fn children(&self) -> Vec<HtmlNode> {
        self.0.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    pub fn child(&self, index: usize) -> Option<HtmlNode> {
        self.0.children.borrow().get(index).cloned()
    }

    pub fn first_child(&self) -> Option<HtmlNode> {
        self.0.children.borrow().first().cloned()
    }

    pub fn last_child(&self) -> Option<HtmlNode> {
        self.0.children.borrow().last().cloned()
    }

    /// Position of `node` among this node's direct children.
    pub fn child_index(&self, node: &HtmlNode) -> Option<usize> {
        self.0.children.borrow().iter().position(|c| c == node)
    }

    /// Whether `node` is a direct child of this node.
    pub fn has_child(&self, node: &HtmlNode) -> bool {
        self.child_index(node).is_some()
    }

    /// Whether this node is `node` or one of its ancestors.
    pub fn is_ancestor_of(&self, node: &HtmlNode) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if n == *self {
                return true;
            }
            current = n.parent();
        }
        false
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    fn can_adopt(&self, child: &HtmlNode) -> bool {
        if !self.accepts_children() {
            trace!("{} does not accept children", self.name());
            return false;
        }
        if child.is_ancestor_of(self) {
            trace!("refusing to attach {} under its own subtree", child.name());
            return false;
        }
        true
    }

    /// Detach this node from its parent, if it has one.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            let mut siblings = parent.0.children.borrow_mut();
            if let Some(index) = siblings.iter().position(|c| c == self) {
                siblings.remove(index);
            }
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    fn adopt(&self, child: &HtmlNode) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
    }

    /// Append `child`, moving it out of its current parent first.
    ///
    /// Returns `false` if this node is a leaf or void element, or if `child`
    /// is this node or one of its ancestors.
    pub fn add_child(&self, child: &HtmlNode) -> bool {
        if !self.can_adopt(child) {
            return false;
        }
        child.detach();
        self.adopt(child);
        self.0.children.borrow_mut().push(child.clone());
        true
    }

    /// Append a text leaf.
    pub fn add_text(&self, text: &str, escape: bool) -> bool {
        self.add_child(&HtmlNode::text(text, escape))
    }

    /// Append a comment leaf.
    pub fn add_comment(&self, text: &str) -> bool {
        self.add_child(&HtmlNode::comment(text))
    }

    /// Insert `child` at `position` (`0..=child_count`), moving it out of its
    /// current parent first. When `child` already belongs to this node the
    /// position is counted without it.
    pub fn insert(&self, child: &HtmlNode, position: usize) -> bool {
        if !self.can_adopt(child) {
            return false;
        }
        let already_here = usize::from(self.has_child(child));
        if position > self.child_count() - already_here {
            trace!("insert position {} out of range", position);
            return false;
        }
        child.detach();
        self.adopt(child);
        self.0.children.borrow_mut().insert(position, child.clone());
        true
    }

    /// Remove a direct child, clearing its parent reference.
    pub fn remove_child(&self, child: &HtmlNode) -> Option<HtmlNode> {
        let index = self.child_index(child)?;
        self.remove_child_at(index)
    }

    pub fn remove_child_at(&self, index: usize) -> Option<HtmlNode> {
        let removed = {
            let mut children = self.0.children.borrow_mut();
            if index >= children.len() {
                return None;
            }
            children.remove(index)
        };
        *removed.0.parent.borrow_mut() = Weak::new();
        Some(removed)
    }

    /// Remove every child, returning them in order.
    pub fn remove_all_children(&self) -> Vec<HtmlNode> {
        let removed = std::mem::take(&mut *self.0.children.borrow_mut());
        for child in &removed {
            *child.0.parent.borrow_mut() = Weak::new();
        }
        removed
    }

    /// Put `new` where `old` is. `old` must be a direct child.
    pub fn replace_child(&self, old: &HtmlNode, new: &HtmlNode) -> bool {
        if old == new {
            return self.has_child(old);
        }
        if !self.has_child(old) || !self.can_adopt(new) {
            return false;
        }
        new.detach();
        let Some(index) = self.child_index(old) else {
            return false;
        };
        self.adopt(new);
        let previous = std::mem::replace(&mut self.0.children.borrow_mut()[index], new.clone());
        *previous.0.parent.borrow_mut() = Weak::new();
        true
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    // Depth-first: every child subtree is searched before this level's
    // children are tested, so the deepest match under the first child wins.
    fn find_descendant(&self, pred: &dyn Fn(&HtmlNode) -> bool) -> Option<HtmlNode> {
        let children = self.children();
        for child in &children {
            if child.accepts_children() {
                if let Some(found) = child.find_descendant(pred) {
                    return Some(found);
                }
            }
        }
        children.into_iter().find(|c| pred(c))
    }

    fn collect_descendants(&self, pred: &dyn Fn(&HtmlNode) -> bool, out: &mut Vec<HtmlNode>) {
        let children = self.children();
        for child in &children {
            if child.accepts_children() {
                child.collect_descendants(pred, out);
            }
        }
        out.extend(children.into_iter().filter(|c| pred(c)));
    }

    /// All descendant elements named `name` (case-insensitive), in search
    /// order: nested matches precede the matches at their own level.
    pub fn children_by_tag_name(&self, name: &str) -> Vec<HtmlNode> {
        let name = name.trim().to_ascii_lowercase();
        let mut out = Vec::new();
        self.collect_descendants(
            &|n| matches!(&*n.kind(), NodeKind::Element(el) if el.name == name),
            &mut out,
        );
        out
    }

    /// First descendant whose `id` is `id`.
    pub fn child_by_id(&self, id: &str) -> Option<HtmlNode> {
        self.child_by_attribute_value("id", id)
    }

    /// First descendant whose attribute `attr` equals `value`.
    pub fn child_by_attribute_value(&self, attr: &str, value: &str) -> Option<HtmlNode> {
        self.find_descendant(&|n| match &*n.kind() {
            NodeKind::Element(el) => el.attributes.get(attr) == Some(Some(value)),
            _ => false,
        })
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// The opening tag, e.g. `<a href="x">`. Empty for leaves.
    pub fn open_tag(&self) -> String {
        match &*self.kind() {
            NodeKind::Element(el) => serialize::open_tag(el),
            _ => String::new(),
        }
    }

    /// The closing tag. Empty for leaves and void elements.
    pub fn close_tag(&self) -> String {
        match &*self.kind() {
            NodeKind::Element(el) if !el.is_void() => format!("</{}>", el.name),
            _ => String::new(),
        }
    }

    /// Serialize this subtree, formatted or compact, with default options.
    pub fn to_html(&self, formatted: bool) -> String {
        let options = SerializeOptions::new().with_formatted(formatted);
        serialize::to_html(self, &options)
    }

    pub fn to_html_with(&self, options: &SerializeOptions) -> String {
        serialize::to_html(self, options)
    }

    /// Render this subtree as colour-highlighted HTML source for display.
    pub fn to_highlighted_code(&self, options: &HighlightOptions) -> String {
        serialize::to_highlighted_code(self, options)
    }
}

impl PartialEq for HtmlNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for HtmlNode {}

impl fmt::Debug for HtmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind() {
            NodeKind::Element(el) => f
                .debug_struct("Element")
                .field("name", &el.name)
                .field("attributes", &el.attributes)
                .field("children", &*self.0.children.borrow())
                .finish(),
            NodeKind::Text(t) => f.debug_tuple("Text").field(&t.raw).finish(),
            NodeKind::Comment(t) => f.debug_tuple("Comment").field(&t.raw).finish(),
        }
    }
}

impl fmt::Display for HtmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html(false))
    }
}
