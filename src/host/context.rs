use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

/// Shared single-threaded handle to the host's render context.
///
/// One request runs per process; `Rc<RefCell<_>>` gives the loader and
/// the host adapter the same view without locking.
pub type ContextHandle = Rc<RefCell<RenderContext>>;

/// Mutable per-request rendering state of the host.
///
/// Stands in for the host's global query object: a flat map of variables
/// templates can read while rendering.
#[derive(Debug, Default)]
pub struct RenderContext {
    vars: BTreeMap<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this context in a shared handle.
    pub fn handle(self) -> ContextHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn insert_var(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn remove_var(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_and_read_back() {
        let mut ctx = RenderContext::new();
        ctx.insert_var("data", json!({"title": "Hello"}));
        assert_eq!(ctx.var("data").unwrap()["title"], "Hello");
        assert!(ctx.contains_var("data"));
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut ctx = RenderContext::new();
        ctx.insert_var("recipe", json!(1));
        assert_eq!(ctx.remove_var("recipe"), Some(json!(1)));
        assert_eq!(ctx.remove_var("recipe"), None);
        assert_eq!(ctx.var_count(), 0);
    }

    #[test]
    fn handle_shares_one_context() {
        let handle = RenderContext::new().handle();
        let second = Rc::clone(&handle);
        handle.borrow_mut().insert_var("data", json!(true));
        assert!(second.borrow().contains_var("data"));
    }
}
