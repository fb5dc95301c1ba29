// category.rs - Identity tokens naming classes of exceptional conditions

use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

// Next identity to hand out. Zero is never minted.
static NEXT_CATEGORY_ID: AtomicU64 = AtomicU64::new(1);

/// A category of problematic situations in a program.
///
/// Categories compare by identity: two categories are equal only when they
/// come from the same declaration, even if their names are identical. Share a
/// single instance between the throw and catch sites, usually through
/// [`exception_category!`](crate::exception_category).
///
/// ```
/// use unwinder::Category;
///
/// let io = Category::declare("I/O Error");
/// let other = Category::declare("I/O Error");
/// assert_ne!(io, other);
/// assert_eq!(io, io);
/// ```
#[derive(Clone, Copy)]
pub struct Category {
    id: NonZeroU64,
    name: &'static str,
    display: &'static str,
}

impl Category {
    /// Declare a new category whose name is its display text.
    pub fn declare(display: &'static str) -> Self {
        Self::named(display, display)
    }

    /// Declare a new category with an identifier-style name and a display
    /// text used as the default exception message.
    pub fn named(name: &'static str, display: &'static str) -> Self {
        let raw = NEXT_CATEGORY_ID.fetch_add(1, Ordering::Relaxed);
        let id = NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN);
        tracing::trace!(id = raw, name, "declared exception category");
        Category { id, name, display }
    }

    pub fn id(&self) -> NonZeroU64 {
        self.id
    }

    /// The name reported for exceptions of this category (e.g. `PET_NOT_FOUND`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable text, used as the message when none is given.
    pub fn display(&self) -> &'static str {
        self.display
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({}#{})", self.name, self.id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display)
    }
}
