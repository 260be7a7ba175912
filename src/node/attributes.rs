// Ordered, case-insensitive attribute storage and inline style parsing.

/// An ordered attribute map.
///
/// Names are stored lowercase and are unique. A `None` value is a valueless
/// (boolean) attribute such as `disabled`. Insertion order is preserved and
/// re-setting an existing name keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an attribute. The outer `Option` is presence, the inner one
    /// is the value (`None` for valueless attributes).
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace an attribute, returning the previous value if any.
    pub fn insert(&mut self, name: &str, value: Option<String>) -> Option<Option<String>> {
        let name = name.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        let index = self
            .entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn to_vec(&self) -> Vec<(String, Option<String>)> {
        self.entries.clone()
    }
}

/// Parse an inline `style` value into ordered `(property, value)` pairs.
///
/// Declarations are split on `;`, then on the first `:`. Both halves are
/// trimmed and property names lowercased; empty or malformed declarations
/// are dropped. A repeated property keeps its first position and last value.
pub fn parse_style(raw: &str) -> Vec<(String, String)> {
    let mut props: Vec<(String, String)> = Vec::new();
    for declaration in raw.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        push_style_prop(&mut props, key, value.to_string());
    }
    props
}

pub(crate) fn push_style_prop(props: &mut Vec<(String, String)>, key: String, value: String) {
    match props.iter_mut().find(|(k, _)| *k == key) {
        Some((_, existing)) => *existing = value,
        None => props.push((key, value)),
    }
}

/// Render style pairs in normalized `key:value;key:value;` form.
pub fn render_style(props: &[(String, String)]) -> String {
    props
        .iter()
        .map(|(k, v)| format!("{k}:{v};"))
        .collect()
}
