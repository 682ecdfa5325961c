//! Stacked substitution in front of a writer.
//!
//! Each [`SubstitutionWriter::push`] starts a layer with its own sigil and
//! variables; [`SubstitutionWriter::pop`] ends the most recent one. Text is
//! expanded by the top layer first, then by every layer beneath it, and
//! finally reaches the wrapped writer.
//!
//! Layers work a line at a time. A partial line stays in its layer until a
//! newline arrives, the layer is popped, or the writer is flushed.

use super::TextError;
use super::variables::{VariableMap, expand_variables};
use std::io::{self, Write};

#[derive(Debug)]
struct Layer {
    sigil: char,
    vars: VariableMap,
    pending: Vec<u8>,
}

impl Layer {
    /// Remove and expand the text that is ready to move down.
    ///
    /// With `everything` set, a multibyte character cut short at the end of
    /// `pending` stays behind until its remaining bytes arrive. Nothing is
    /// removed when the ready text is not valid UTF-8.
    fn take_ready(&mut self, everything: bool) -> io::Result<Vec<u8>> {
        let cut = if everything {
            match std::str::from_utf8(&self.pending) {
                Ok(_) => self.pending.len(),
                Err(e) if e.error_len().is_none() => e.valid_up_to(),
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
            }
        } else {
            match self.pending.iter().rposition(|&b| b == b'\n') {
                Some(i) => i + 1,
                None => return Ok(Vec::new()),
            }
        };

        let text = std::str::from_utf8(&self.pending[..cut])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut expanded = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            expanded.push_str(&expand_variables(line, &self.vars, self.sigil));
        }

        self.pending.drain(..cut);
        Ok(expanded.into_bytes())
    }
}

/// A writer that expands variables through a stack of layers.
///
/// Call [`into_inner`](Self::into_inner) when done; dropping the writer
/// discards text still held by open layers.
#[derive(Debug)]
pub struct SubstitutionWriter<W: Write> {
    inner: W,
    layers: Vec<Layer>,
}

impl<W: Write> SubstitutionWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            layers: Vec::new(),
        }
    }

    /// Start a substitution layer on top of the stack.
    pub fn push(&mut self, sigil: char, vars: VariableMap) {
        self.layers.push(Layer {
            sigil,
            vars,
            pending: Vec::new(),
        });
        tracing::debug!(depth = self.layers.len(), %sigil, "substitution layer started");
    }

    /// End the top layer, expanding whatever it still holds.
    ///
    /// Fails with an `InvalidData` I/O error, leaving the layer active, if
    /// the layer ends inside a multibyte character.
    pub fn pop(&mut self) -> Result<(), TextError> {
        let below = self
            .layers
            .len()
            .checked_sub(1)
            .ok_or(TextError::NoSubstitutionLayer)?;
        let layer = self
            .layers
            .last_mut()
            .ok_or(TextError::NoSubstitutionLayer)?;
        let rest = layer.take_ready(true)?;
        let truncated = !layer.pending.is_empty();

        self.cascade(below, rest, false)?;
        if truncated {
            return Err(TextError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "substitution layer ended inside a UTF-8 sequence",
            )));
        }

        self.layers.pop();
        tracing::debug!(depth = self.layers.len(), "substitution layer ended");
        Ok(())
    }

    /// Number of active layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// End every layer, flush, and return the wrapped writer.
    pub fn into_inner(mut self) -> Result<W, TextError> {
        while !self.layers.is_empty() {
            self.pop()?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// Feed `carry` into layer `top - 1` and move ready text downwards.
    fn cascade(&mut self, top: usize, mut carry: Vec<u8>, everything: bool) -> io::Result<()> {
        for layer in self.layers[..top].iter_mut().rev() {
            layer.pending.append(&mut carry);
            carry = layer.take_ready(everything)?;
            if carry.is_empty() && !everything {
                return Ok(());
            }
        }
        self.inner.write_all(&carry)
    }
}

impl<W: Write> Write for SubstitutionWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.layers.is_empty() {
            return self.inner.write(buf);
        }
        self.cascade(self.layers.len(), buf.to_vec(), false)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.cascade(self.layers.len(), Vec::new(), true)?;
        self.inner.flush()
    }
}
