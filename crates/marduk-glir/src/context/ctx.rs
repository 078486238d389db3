use std::any::Any;
use std::cell::OnceCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};

use crate::command::QueueHandle;
use crate::executor::Executor;

use super::{ConfigValue, ContextConfig, ContextError, SharedNamespace};

/// GPU-side state of one rendering surface.
///
/// Owns:
/// - the validated configuration the backend should honor
/// - a local queue for surface-bound objects (render/frame buffers) and
///   context markers
/// - at most one [`SharedNamespace`], attached once by the backend
#[derive(Debug, Default)]
pub struct Context {
    config: ContextConfig,
    glir: QueueHandle,
    shared: OnceCell<Rc<SharedNamespace>>,
}

impl Context {
    pub fn new(config: ContextConfig) -> Self {
        Self {
            config,
            glir: QueueHandle::new(),
            shared: OnceCell::new(),
        }
    }

    /// Creates a context from string-keyed overrides of the default config.
    pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        ContextConfig::from_overrides(overrides).map(Self::new)
    }

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Queue for objects that belong to this surface only.
    #[inline]
    pub fn glir(&self) -> &QueueHandle {
        &self.glir
    }

    /// The attached shared namespace, if the backend has set one.
    #[inline]
    pub fn shared(&self) -> Option<&Rc<SharedNamespace>> {
        self.shared.get()
    }

    /// Creates and attaches a new shared namespace.
    ///
    /// `reference` is the backend object that represents the namespace; it
    /// is held weakly. Fails if a namespace is already attached, leaving the
    /// existing one untouched.
    pub fn create_shared<T: Any>(
        &self,
        name: impl Into<String>,
        reference: &Rc<T>,
    ) -> Result<&Rc<SharedNamespace>, ContextError> {
        if self.shared.get().is_some() {
            return Err(ContextError::SharedAlreadySet);
        }
        let shared = Rc::new(SharedNamespace::new(name, reference));
        log::debug!("created shared namespace for {} backend", shared.name());
        self.attach(shared)
    }

    /// Attaches the namespace of `other`, so both contexts share objects.
    pub fn share_with(&self, other: &Context) -> Result<&Rc<SharedNamespace>, ContextError> {
        let shared = other.shared().ok_or(ContextError::SharedNotAttached)?;
        self.attach(Rc::clone(shared))
    }

    /// Whether both contexts resolve shareable objects in the same namespace.
    pub fn shares_with(&self, other: &Context) -> bool {
        match (self.shared(), other.shared()) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn attach(&self, shared: Rc<SharedNamespace>) -> Result<&Rc<SharedNamespace>, ContextError> {
        self.shared
            .set(shared)
            .map_err(|_| ContextError::SharedAlreadySet)?;
        self.shared.get().ok_or(ContextError::SharedNotAttached)
    }

    /// Drains pending commands into `executor`.
    ///
    /// The shared queue goes first: local frame buffers may attach textures
    /// created there.
    pub fn flush_commands(&self, executor: &mut dyn Executor) -> Result<()> {
        if let Some(shared) = self.shared() {
            let batch = shared.glir().clear();
            if !batch.is_empty() {
                log::trace!("replaying {} shared commands", batch.len());
                executor
                    .execute(batch)
                    .with_context(|| format!("failed to replay shared queue ({})", shared.name()))?;
            }
        }

        let batch = self.glir.clear();
        if !batch.is_empty() {
            log::trace!("replaying {} context commands", batch.len());
            executor
                .execute(batch)
                .context("failed to replay context queue")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Opcode};
    use crate::logging::{init_logging, LoggingConfig};
    use crate::object::{GlirType, GpuObject, ObjectId};

    struct Backend;

    #[derive(Default)]
    struct Recorder {
        batches: Vec<Vec<Command>>,
    }

    impl Executor for Recorder {
        fn execute(&mut self, commands: Vec<Command>) -> Result<()> {
            self.batches.push(commands);
            Ok(())
        }
    }

    struct Failing;

    impl Executor for Failing {
        fn execute(&mut self, _: Vec<Command>) -> Result<()> {
            anyhow::bail!("device lost")
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_context_has_no_shared_namespace() {
        let ctx = Context::default();
        assert!(ctx.shared().is_none());
        assert!(ctx.glir().is_empty());
        assert_eq!(ctx.config(), &ContextConfig::default());
    }

    #[test]
    fn overrides_are_validated() {
        let ctx = Context::from_overrides([("stencil_size", 8_i64)]).unwrap();
        assert_eq!(ctx.config().stencil_size, 8);
        assert_eq!(ctx.config().depth_size, 16);

        assert!(matches!(
            Context::from_overrides([("bogus_key", 1_i64)]),
            Err(ContextError::UnknownConfigKey(_))
        ));
        assert!(matches!(
            Context::from_overrides([("samples", "high")]),
            Err(ContextError::ConfigType { .. })
        ));
    }

    // ── sharing ───────────────────────────────────────────────────────────

    #[test]
    fn create_shared_only_once() {
        let backend = Rc::new(Backend);
        let other = Rc::new(Backend);
        let ctx = Context::default();

        let first = Rc::clone(ctx.create_shared("winit", &backend).unwrap());
        let err = ctx.create_shared("other", &other).unwrap_err();

        assert_eq!(err, ContextError::SharedAlreadySet);
        let current = ctx.shared().unwrap();
        assert!(Rc::ptr_eq(current, &first));
        assert_eq!(current.name(), "winit");
        assert!(current.reference_as::<Backend>().is_ok());
    }

    #[test]
    fn share_with_uses_same_namespace() {
        let backend = Rc::new(Backend);
        let a = Context::default();
        let b = Context::default();
        let c = Context::default();
        a.create_shared("winit", &backend).unwrap();
        b.share_with(&a).unwrap();
        c.create_shared("winit", &backend).unwrap();

        assert!(a.shares_with(&b));
        assert!(!a.shares_with(&c));
        assert!(a.shared().unwrap().glir().same_queue(b.shared().unwrap().glir()));
        assert_eq!(b.share_with(&c).unwrap_err(), ContextError::SharedAlreadySet);
    }

    #[test]
    fn share_with_requires_a_namespace() {
        let a = Context::default();
        let b = Context::default();
        assert_eq!(a.share_with(&b).unwrap_err(), ContextError::SharedNotAttached);
        assert!(!a.shares_with(&b));
    }

    // ── flush ─────────────────────────────────────────────────────────────

    #[test]
    fn flush_drains_shared_then_local() {
        let backend = Rc::new(Backend);
        let ctx = Context::default();
        let shared = ctx.create_shared("winit", &backend).unwrap();

        ctx.glir().command(Opcode::Current, ObjectId::CONTEXT, vec![]);
        shared.glir().command(Opcode::Create, ObjectId::new(1), vec![]);

        let mut rec = Recorder::default();
        ctx.flush_commands(&mut rec).unwrap();

        assert_eq!(rec.batches.len(), 2);
        assert_eq!(rec.batches[0][0].opcode(), &Opcode::Create);
        assert_eq!(rec.batches[1][0].opcode(), &Opcode::Current);
        assert!(ctx.glir().is_empty());
        assert!(shared.glir().is_empty());
    }

    #[test]
    fn flush_replays_associated_objects_with_logging() {
        init_logging(LoggingConfig {
            env_filter: Some("marduk_glir=trace".to_string()),
            is_test: true,
            ..LoggingConfig::default()
        });

        let backend = Rc::new(Backend);
        let ctx = Context::default();
        ctx.create_shared("winit", &backend).unwrap();

        let mut tex = GpuObject::new(GlirType::Texture);
        assert!(tex.associate_with(&ctx).unwrap());
        assert!(!tex.associate_with(&ctx).unwrap());
        tex.command(Opcode::Data, vec![]);

        let mut rec = Recorder::default();
        ctx.flush_commands(&mut rec).unwrap();

        assert_eq!(rec.batches.len(), 1);
        let ops: Vec<_> = rec.batches[0].iter().map(|c| c.opcode().clone()).collect();
        assert_eq!(ops, vec![Opcode::Create, Opcode::Data]);
    }

    #[test]
    fn flush_skips_empty_queues() {
        let ctx = Context::default();
        let mut rec = Recorder::default();
        ctx.flush_commands(&mut rec).unwrap();
        assert!(rec.batches.is_empty());
    }

    #[test]
    fn flush_reports_executor_failure() {
        let ctx = Context::default();
        ctx.glir().command(Opcode::Current, ObjectId::CONTEXT, vec![]);
        let err = ctx.flush_commands(&mut Failing).unwrap_err();
        assert!(format!("{err:#}").contains("device lost"));
    }
}
