//! Page identifiers and visibility classes

use serde::{Deserialize, Serialize};

/// Identifier of a page element (its DOM `id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub String);

impl PageId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handle on one page element
///
/// Pages with an `id` are addressed by it. A page without one can never be
/// navigated to, but it still has to be hidden, so it is addressed by its
/// position among the document's page elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    Id(PageId),
    Position(usize),
}

impl PageKey {
    /// The page's id, if it has one
    pub fn id(&self) -> Option<&PageId> {
        match self {
            PageKey::Id(id) => Some(id),
            PageKey::Position(_) => None,
        }
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageKey::Id(id) => write!(f, "{}", id),
            PageKey::Position(n) => write!(f, "page[{}]", n),
        }
    }
}

impl From<PageId> for PageKey {
    fn from(id: PageId) -> Self {
        PageKey::Id(id)
    }
}

/// Visibility class carried by a page element
///
/// Stylesheets give these their meaning: `active` fades the page in,
/// `hidden` takes it out of layout. A page with neither is mid-fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageClass {
    Active,
    Hidden,
}

impl PageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageClass::Active => "active",
            PageClass::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for PageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the camera and the core object should travel for a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTarget {
    /// Core object x position
    pub core_x: f32,
    /// Camera z position
    pub camera_z: f32,
    /// Interpolation time in seconds
    pub duration_secs: f32,
}
