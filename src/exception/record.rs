// record.rs - The concrete exception occurrence held by a context

use std::collections::TryReserveError;
use std::fmt::{self, Write};
use std::panic::Location;

use super::category::Category;

/// Default upper bound for exception messages, in bytes.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 256;

/// Source location an exception was thrown (or rethrown) from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Origin {
    /// Capture the location of the caller of the enclosing `#[track_caller]` chain.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for Origin {
    fn from(location: &'static Location<'static>) -> Self {
        Origin {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A specific occurrence of an exceptional situation.
///
/// Combines a [`Category`] with a message describing what went wrong in this
/// particular instance. The message buffer is allocated once, with room for
/// `limit` bytes, and reused by every later [`fill`](Exception::fill); longer
/// messages are cut at the last character boundary that fits.
#[derive(Debug, Clone)]
pub struct Exception {
    category: Option<Category>,
    name: &'static str,
    message: String,
    origin: Option<Origin>,
    truncated: bool,
    limit: usize,
}

impl Exception {
    /// Build a record for `category`, with the default message limit.
    ///
    /// Without a message, the category's display text is used.
    pub fn new(category: &Category, message: Option<&str>) -> Self {
        let mut exception = Exception::with_limit(DEFAULT_MAX_MESSAGE_LENGTH);
        exception.fill(category, message);
        exception
    }

    /// An empty record able to hold messages of up to `limit` bytes.
    ///
    /// Panics if the buffer cannot be allocated; see [`Exception::try_with_limit`].
    pub fn with_limit(limit: usize) -> Self {
        Exception::empty(String::with_capacity(limit), limit)
    }

    /// Like [`Exception::with_limit`], but reports allocation failure.
    pub fn try_with_limit(limit: usize) -> Result<Self, TryReserveError> {
        let mut message = String::new();
        message.try_reserve_exact(limit)?;
        Ok(Exception::empty(message, limit))
    }

    fn empty(message: String, limit: usize) -> Self {
        Exception {
            category: None,
            name: "",
            message,
            origin: None,
            truncated: false,
            limit,
        }
    }

    /// Overwrite this record with a new occurrence of `category`.
    pub fn fill(&mut self, category: &Category, message: Option<&str>) {
        let text = message.unwrap_or(category.display());
        self.fill_fmt(category, format_args!("{}", text));
    }

    /// Overwrite this record, formatting the message into the bounded buffer.
    pub fn fill_fmt(&mut self, category: &Category, args: fmt::Arguments<'_>) {
        self.category = Some(*category);
        self.name = category.name();
        self.origin = None;
        self.message.clear();

        let mut writer = BoundedWriter {
            buf: &mut self.message,
            limit: self.limit,
            truncated: false,
        };
        // BoundedWriter never fails; an error here comes from a user Display
        // impl and leaves whatever was written so far.
        let _ = writer.write_fmt(args);
        self.truncated = writer.truncated;

        if self.truncated {
            tracing::debug!(
                name = self.name,
                limit = self.limit,
                "exception message truncated"
            );
        }
    }

    pub(crate) fn set_origin(&mut self, origin: Option<Origin>) {
        self.origin = origin;
    }

    /// Whether this record holds an exception of `category`.
    pub fn is(&self, category: &Category) -> bool {
        self.category.as_ref() == Some(category)
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    /// Whether the last message did not fit and was cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Maximum message length in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, "\n    at {}", origin)?;
        }
        Ok(())
    }
}

/// `fmt::Write` sink that stops, silently, once `limit` bytes are written.
struct BoundedWriter<'a> {
    buf: &'a mut String,
    limit: usize,
    truncated: bool,
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let room = self.limit.saturating_sub(self.buf.len());
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }

        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.push_str(&s[..end]);
        self.truncated = true;
        Ok(())
    }
}
