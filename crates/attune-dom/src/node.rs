//! Element Node
//!
//! Tag name, attributes, and the focusability rules the widget queries.

/// A single element: tag name plus attribute list.
///
/// Attributes are kept as an ordered list; elements here carry a handful
/// of attributes at most, so linear scans beat a map.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), attrs: Vec::new() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (n, v) in self.attrs.iter_mut() {
            if n == name {
                *v = value.to_string();
                return;
            }
        }
        self.attrs.push((name.to_string(), value.to_string()));
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    /// Whether the element participates in sequential keyboard navigation.
    ///
    /// Fixed selector list: anchors with `href`, non-disabled form
    /// controls, and anything carrying a non-negative `tabindex`.
    pub fn is_focusable(&self) -> bool {
        if self.has_attr("disabled") {
            return false;
        }
        if let Some(value) = self.attr("tabindex") {
            return TabIndex::parse(value).is_focusable();
        }
        match self.tag.as_str() {
            "a" | "area" => self.has_attr("href"),
            "button" | "input" | "select" | "textarea" => true,
            _ => false,
        }
    }

    /// Whether the element qualifies as a widget trigger for focus
    /// restoration: a button, or anything with an explicit `tabindex`.
    pub fn is_activator(&self) -> bool {
        self.tag == "button" || self.has_attr("tabindex")
    }
}

/// Parsed `tabindex` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative or malformed values opt out of sequential navigation
    Skip,
    /// `tabindex="0"` or positive
    Order(i32),
}

impl TabIndex {
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<i32>() {
            Ok(n) if n >= 0 => Self::Order(n),
            _ => Self::Skip,
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Order(_))
    }
}
