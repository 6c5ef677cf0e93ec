use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use super::stack::{Level, Levels, Scope};
use super::TokenSource;
use crate::{Error, Length, RawValue, Reader, Result};

/// Decodes a token stream into traversal operations.
///
/// Arrays and maps are always reported as [`Length::Indeterminate`] unless
/// they are empty, in which case they are reported as
/// `Length::Determinate(0)` and no level is opened for them.
#[derive(Debug)]
pub struct TextReader<S> {
    source: S,
    levels: Levels,
}

impl<S: TokenSource> TextReader<S> {
    pub fn new(source: S) -> TextReader<S> {
        TextReader {
            source,
            levels: Levels::default(),
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn close(&mut self, scope: Scope) -> Result<()> {
        self.levels.pop(scope)?;
        tracing::trace!(?scope, depth = self.levels.depth(), "close");
        Ok(())
    }
}

impl<S: TokenSource> Reader for TextReader<S> {
    fn read_i32(&mut self) -> Result<i32> {
        let value = self.source.read_i64()?;
        i32::try_from(value).map_err(|_| Error::OutOfRange {
            value,
            target: "i32",
        })
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.source.read_i64()
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(self.source.read_f64()? as f32)
    }

    fn read_f64(&mut self) -> Result<f64> {
        self.source.read_f64()
    }

    fn read_string(&mut self) -> Result<String> {
        self.source.read_string()
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let encoded = self.source.read_string()?;
        URL_SAFE_NO_PAD.decode(encoded).map_err(Error::Base64)
    }

    fn read_byte_string(&mut self) -> Result<Vec<u8>> {
        Ok(self.source.read_string()?.into_bytes())
    }

    fn read_value(&mut self, value: &mut dyn RawValue) -> Result<()> {
        let text = self.source.read_string()?;
        value.unmarshal_text(&text).map_err(Error::Value)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.levels.push(Level::new(Scope::Object));
        tracing::trace!(depth = self.levels.depth(), "begin object");
        Ok(())
    }

    fn property(&mut self, name: &str) -> Result<()> {
        let level = self.levels.current_mut();
        if level.scope != Scope::Object {
            return Err(Error::NotAnObject);
        }
        if level.end_reached {
            return Err(Error::NoField(name.to_string()));
        }

        match self.source.read_object_field()? {
            Some(found) if found == name => Ok(()),
            Some(found) => Err(Error::WrongField {
                expected: name.to_string(),
                found,
            }),
            None => {
                self.levels.current_mut().end_reached = true;
                Err(Error::NoField(name.to_string()))
            }
        }
    }

    fn end_object(&mut self) -> Result<()> {
        let level = self.levels.current();
        if level.scope != Scope::Object {
            return Err(Error::NotAnObject);
        }

        if !level.end_reached {
            if let Some(field) = self.source.read_object_field()? {
                self.close(Scope::Object)?;
                tracing::trace!(field = %field, "unread field");
                return Err(Error::ObjectTooBig);
            }
        }
        self.close(Scope::Object)
    }

    fn begin_array(&mut self) -> Result<Length> {
        if !self.source.read_array_next()? {
            tracing::trace!("empty array");
            return Ok(Length::EMPTY);
        }

        self.levels.push(Level::new(Scope::Array));
        tracing::trace!(depth = self.levels.depth(), "begin array");
        Ok(Length::Indeterminate)
    }

    fn have_next(&mut self) -> Result<bool> {
        if self.levels.current().scope != Scope::Array {
            return Err(Error::UnbalancedEnd);
        }
        if self.levels.current().end_reached {
            return Ok(false);
        }

        let has_next = self.source.read_array_next()?;
        self.levels.current_mut().end_reached = !has_next;
        Ok(has_next)
    }

    fn end_array(&mut self) -> Result<()> {
        if self.levels.current().scope != Scope::Array {
            return Err(Error::UnbalancedEnd);
        }

        if !self.levels.current().end_reached && self.source.read_array_next()? {
            self.close(Scope::Array)?;
            return Err(Error::ArrayTooBig);
        }
        self.close(Scope::Array)
    }

    fn begin_map(&mut self) -> Result<Length> {
        let first = match self.source.read_object_field()? {
            Some(key) => key,
            None => {
                tracing::trace!("empty map");
                return Ok(Length::EMPTY);
            }
        };

        let mut level = Level::new(Scope::Map);
        level.pending_key = Some(first);
        self.levels.push(level);
        tracing::trace!(depth = self.levels.depth(), "begin map");
        Ok(Length::Indeterminate)
    }

    fn next_key(&mut self) -> Result<Option<String>> {
        let level = self.levels.current_mut();
        if level.scope != Scope::Map {
            return Err(Error::UnbalancedEnd);
        }
        if let Some(key) = level.pending_key.take() {
            return Ok(Some(key));
        }
        if level.end_reached {
            return Ok(None);
        }

        let key = self.source.read_object_field()?;
        if key.is_none() {
            self.levels.current_mut().end_reached = true;
        }
        Ok(key)
    }

    fn end_map(&mut self) -> Result<()> {
        let level = self.levels.current();
        if level.scope != Scope::Map {
            return Err(Error::UnbalancedEnd);
        }

        let unread = level.pending_key.is_some()
            || (!level.end_reached && self.source.read_object_field()?.is_some());
        self.close(Scope::Map)?;
        if unread {
            return Err(Error::MapTooBig);
        }
        Ok(())
    }
}
