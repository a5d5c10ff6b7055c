//! JSON rendering of a single model value.

use std::io;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::RenderError;

pub const APPLICATION_JSON: &str = "application/json";

/// Named values handed to a view.
pub type Model = Map<String, JsonValue>;

/// The parts of a response a view writes to.
pub trait ResponseSink {
    fn content_type(&self) -> Option<&str>;

    fn set_content_type(&mut self, content_type: &str);

    /// Append bytes to the body.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;

    /// Flush and close the body. Nothing may be written afterwards.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory response, mostly for tests and for callers that forward the body elsewhere.
#[derive(Debug, Default, Clone)]
pub struct BufferedResponse {
    content_type: Option<String>,
    body: Vec<u8>,
    finished: bool,
}

impl BufferedResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ResponseSink for BufferedResponse {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_owned());
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "response body already finished",
            ));
        }
        self.body.extend_from_slice(body);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes the one value of a model as the whole JSON response body.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonView;

impl JsonView {
    #[must_use]
    pub fn new() -> Self {
        JsonView
    }

    /// Build a single-entry model.
    ///
    /// # Errors
    /// Returns `RenderError::Serialize` if `value` cannot be represented as JSON.
    pub fn model<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Result<Model, RenderError> {
        let mut model = Model::new();
        model.insert(key.into(), serde_json::to_value(value)?);
        Ok(model)
    }

    /// Render the model's only value.
    ///
    /// The content type is set to `application/json` unless an earlier stage
    /// already chose one.
    ///
    /// # Errors
    /// Returns `RenderError::ModelSize` without touching the response if the
    /// model does not hold exactly one entry, and propagates serialisation
    /// and I/O failures.
    pub fn render<R: ResponseSink + ?Sized>(
        &self,
        model: &Model,
        response: &mut R,
    ) -> Result<(), RenderError> {
        tracing::debug!(?model, "rendering JSON view");
        let mut values = model.values();
        let (Some(value), None) = (values.next(), values.next()) else {
            return Err(RenderError::ModelSize(model.len()));
        };
        if response.content_type().is_none() {
            response.set_content_type(APPLICATION_JSON);
        }
        let body = serde_json::to_vec(value)?;
        response.write_body(&body)?;
        response.finish()?;
        Ok(())
    }
}
