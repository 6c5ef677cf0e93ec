use crate::{Error, Result};

/// What kind of structure a nesting level belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub(crate) enum Scope {
    #[default]
    Root,
    Object,
    Array,
    Map,
}

/// State of one open structure.
#[derive(Debug, Default)]
pub(crate) struct Level {
    pub scope: Scope,

    /// The terminator of this level has already been consumed.
    pub end_reached: bool,

    /// First map key, read ahead to tell an empty map from a populated one.
    pub pending_key: Option<String>,
}

impl Level {
    pub fn new(scope: Scope) -> Level {
        Level {
            scope,
            end_reached: false,
            pending_key: None,
        }
    }
}

/// The current level plus every enclosing one.
#[derive(Debug, Default)]
pub(crate) struct Levels {
    current: Level,
    enclosing: Vec<Level>,
}

impl Levels {
    #[inline]
    pub fn current(&self) -> &Level {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Level {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.enclosing.len()
    }

    pub fn push(&mut self, level: Level) {
        let previous = std::mem::replace(&mut self.current, level);
        self.enclosing.push(previous);
    }

    /// Close the current level, which must be of kind `scope`.
    pub fn pop(&mut self, scope: Scope) -> Result<Level> {
        if self.current.scope != scope {
            return Err(Error::UnbalancedEnd);
        }
        let previous = self.enclosing.pop().ok_or(Error::UnbalancedEnd)?;
        Ok(std::mem::replace(&mut self.current, previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn push_and_pop_restore_state() {
        let mut levels = Levels::default();
        levels.push(Level::new(Scope::Array));
        levels.current_mut().end_reached = true;
        levels.push(Level::new(Scope::Object));
        assert_eq!(levels.depth(), 2);
        assert_eq!(levels.current().scope, Scope::Object);

        let closed = levels.pop(Scope::Object).unwrap();
        assert_eq!(closed.scope, Scope::Object);
        assert_eq!(levels.current().scope, Scope::Array);
        assert!(levels.current().end_reached);
    }

    #[test]
    fn mismatched_end_is_rejected() {
        let mut levels = Levels::default();
        assert_matches!(levels.pop(Scope::Root), Err(Error::UnbalancedEnd));

        levels.push(Level::new(Scope::Map));
        assert_matches!(levels.pop(Scope::Array), Err(Error::UnbalancedEnd));
        assert_eq!(levels.depth(), 1);
        assert_eq!(levels.current().scope, Scope::Map);
    }
}
