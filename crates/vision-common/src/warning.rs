//! Document warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The CLI uses it to surface parse issues: things that are accepted but
//! probably not what the author meant (a repeated attribute, for example).
//! The parser itself only collects issues and never touches this state.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Remember `key`, returning true the first time it is seen.
fn record(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Parser", "duplicate attribute 'id' on <div>, last value wins");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(key(component, message)) {
        eprintln!("{}", format!("[vision {component}] ⚠ {message}").yellow());
    }
}

/// Returns true if this warning has already been printed.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
