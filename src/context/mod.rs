//! Application context bundling the config store and the debug printer.

use std::io::Write;

use crate::{ConfigStore, Printer};

/// Owns one [`ConfigStore`] and one [`Printer`] for a unit of work.
///
/// Build one per process, request, or test; nothing is shared between
/// instances.
///
/// ## Example
///
/// ```no_run
/// use layer_fnd::{AppContext, ConfigStore};
///
/// let mut ctx = AppContext::builder()
///     .with_config(ConfigStore::new().with_directory("config/autoload"))
///     .build();
///
/// let port = ctx.config_mut().get("server.port")?.cloned();
/// if let Some(port) = port {
///     ctx.printer_mut().dump(&port, "")?;
/// }
/// print!("{}", ctx.printer().contents());
/// # Ok::<(), layer_fnd::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext<W: Write = Vec<u8>> {
    config: ConfigStore,
    printer: Printer<W>,
}

impl<W: Write> AppContext<W> {
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    pub fn printer(&self) -> &Printer<W> {
        &self.printer
    }

    pub fn printer_mut(&mut self) -> &mut Printer<W> {
        &mut self.printer
    }

    pub fn into_parts(self) -> (ConfigStore, Printer<W>) {
        (self.config, self.printer)
    }
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder {
            config: None,
            sink: Vec::new(),
        }
    }
}

/// Builder for constructing an [`AppContext`].
///
/// Without [`with_config`](Self::with_config) the context gets a fresh
/// default store; without [`with_sink`](Self::with_sink) output is buffered
/// in memory.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder<W: Write = Vec<u8>> {
    config: Option<ConfigStore>,
    sink: W,
}

impl<W: Write> AppContextBuilder<W> {
    pub fn with_config(self, config: ConfigStore) -> Self {
        Self {
            config: Some(config),
            ..self
        }
    }

    /// Sends debug output to `sink` instead of an in-memory buffer.
    pub fn with_sink<S: Write>(self, sink: S) -> AppContextBuilder<S> {
        AppContextBuilder {
            config: self.config,
            sink,
        }
    }

    pub fn build(self) -> AppContext<W> {
        AppContext {
            config: self.config.unwrap_or_default(),
            printer: Printer::new(self.sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_defaults() {
        let ctx = AppContext::builder().build();

        assert_eq!(ctx.config().directory(), std::path::Path::new(crate::config::DEFAULT_DIRECTORY));
        assert!(!ctx.printer().is_engaged());
    }

    #[test]
    fn test_contexts_are_isolated() {
        let mut first = AppContext::builder().build();
        let second = AppContext::builder().build();

        first.config_mut().set("a.b", 5);

        assert_eq!(first.config().cached("a.b"), Some(&Value::Integer(5)));
        assert_eq!(second.config().cached("a.b"), None);
    }

    #[test]
    fn test_custom_sink() {
        let mut ctx = AppContext::builder()
            .with_sink(std::io::Cursor::new(Vec::new()))
            .build();

        ctx.printer_mut().dump(&Value::from(true), "").unwrap();

        let (_, printer) = ctx.into_parts();
        let written = printer.into_inner().unwrap().into_inner();
        assert_eq!(written, b"boolean true\n");
    }
}
