use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};
use parking_lot::Mutex;
use tracing::{debug, error, info_span};
use uuid::Uuid;

use crate::{
    any::TypeInfo,
    config::Config,
    context::ResolutionContext,
    dependency_resolver::{Argument, Dependency},
    errors::{
        BuildErrorKind, ContainerErrorKind, InstantiatorErrorKind, ProducerErrorKind, RegisterErrorKind, ResolveErrorKind, TagErrorKind,
    },
    filter::{self, TagFilter},
    producer::{prepare, Generator, Producer},
    registry::{RegistrationRecord, Registry},
    service::Service as _,
    tag::{self, normalize_tags, registration_tags, IntoTags, Tag, CONTAINER_TAG},
    utils::thread_safety::{downcast, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// Hierarchical registry of producers.
///
/// Cloning a container gives another handle to the same registrations.
/// Child containers keep their parent alive and delegate to it for tags they don't override.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

pub(crate) struct ContainerInner {
    id: Uuid,
    parent: Option<Container>,
    registry: Mutex<Registry>,
    filter: Option<TagFilter>,
    config: Config,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a root container, or a child of `parent` if one is given.
/// Without a config the child inherits the parent's one.
#[inline]
#[must_use]
pub fn create_container(parent: Option<&Container>, config: Option<Config>) -> Container {
    match (parent, config) {
        (Some(parent), Some(config)) => parent.create_container_with_config(config),
        (Some(parent), None) => parent.create_container(),
        (None, Some(config)) => Container::with_config(config),
        (None, None) => Container::new(),
    }
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[inline]
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::init(None, None, config)
    }

    fn init(parent: Option<Container>, filter: Option<TagFilter>, config: Config) -> Self {
        let container = Self {
            inner: RcThreadSafety::new(ContainerInner {
                id: Uuid::new_v4(),
                parent,
                registry: Mutex::new(Registry::new()),
                filter,
                config,
            }),
        };
        debug!(
            container = %container.inner.id,
            parent = ?container.inner.parent.as_ref().map(|parent| parent.inner.id),
            "Container created"
        );
        container
    }

    /// Unique identifier of this container
    #[inline]
    #[must_use]
    pub fn container_id(&self) -> String {
        self.inner.id.to_string()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Container> {
        self.inner.parent.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> Config {
        self.inner.config
    }

    #[inline]
    #[must_use]
    pub fn filter(&self) -> Option<&TagFilter> {
        self.inner.filter.as_ref()
    }

    /// Number of registrations made directly in this container, inherited ones aren't counted
    #[inline]
    #[must_use]
    pub fn registrations_len(&self) -> usize {
        self.inner.registry.lock().len()
    }

    /// Creates a child container with the same config
    #[inline]
    #[must_use]
    pub fn create_container(&self) -> Container {
        self.create_container_with_config(self.inner.config)
    }

    #[inline]
    #[must_use]
    pub fn create_container_with_config(&self, config: Config) -> Container {
        Self::init(Some(self.clone()), None, config)
    }

    #[deprecated(note = "use `create_container` instead")]
    #[inline]
    #[must_use]
    pub fn create_child(&self) -> Container {
        self.create_container()
    }

    /// Creates a child container that only sees candidates carrying at least one of `tags`
    ///
    /// # Errors
    /// Returns [`TagErrorKind`] if `tags` is empty or contains a blank tag
    pub fn filter_any(&self, tags: impl IntoTags) -> Result<Container, TagErrorKind> {
        self.filtered(TagFilter::Any(normalize_tags(tags)?))
    }

    /// Creates a child container that only sees candidates carrying all of `tags`
    ///
    /// # Errors
    /// Returns [`TagErrorKind`] if `tags` is empty or contains a blank tag
    pub fn filter_all(&self, tags: impl IntoTags) -> Result<Container, TagErrorKind> {
        self.filtered(TagFilter::All(normalize_tags(tags)?))
    }

    /// Creates a child container that hides candidates carrying any of `tags`
    ///
    /// # Errors
    /// Returns [`TagErrorKind`] if `tags` is empty or contains a blank tag
    pub fn filter_out(&self, tags: impl IntoTags) -> Result<Container, TagErrorKind> {
        self.filtered(TagFilter::Out(normalize_tags(tags)?))
    }

    #[inline]
    fn filtered(&self, filter: TagFilter) -> Result<Container, TagErrorKind> {
        Ok(Self::init(Some(self.clone()), Some(filter), self.inner.config))
    }
}

impl Container {
    /// Registers a producer against one or more tags.
    /// Callables get their dependency ids from their introspected parameter names.
    ///
    /// Registering a tag again overlays the previous registration, which stays visible to [`Self::resolve_all`].
    ///
    /// # Errors
    /// - Returns [`RegisterErrorKind::InvalidTag`] if tags are empty, blank or reserved
    /// - Returns [`RegisterErrorKind::Producer`] if the callable is unrecognized or its dependency ids are unknown
    pub fn register(&self, tags: impl IntoTags, producer: impl Into<Producer>) -> Result<(), RegisterErrorKind> {
        self.register_inner(tags, producer.into(), None)
    }

    /// Registers a producer whose positional arguments are resolved from `dependency_ids`, ignoring its parameter names
    ///
    /// # Errors
    /// - Returns [`RegisterErrorKind::InvalidTag`] if tags are empty, blank or reserved
    /// - Returns [`RegisterErrorKind::Producer`] if the callable is unrecognized,
    ///   a dependency id is blank, or their count differs from the producer's arity
    pub fn register_with_dependencies(
        &self,
        tags: impl IntoTags,
        producer: impl Into<Producer>,
        dependency_ids: impl IntoTags,
    ) -> Result<(), RegisterErrorKind> {
        let dependency_ids = tag::dependency_ids(dependency_ids).map_err(ProducerErrorKind::from)?;
        self.register_inner(tags, producer.into(), Some(dependency_ids))
    }

    fn register_inner(&self, tags: impl IntoTags, producer: Producer, dependency_ids: Option<Vec<Tag>>) -> Result<(), RegisterErrorKind> {
        let span = info_span!("register", container = %self.inner.id);
        let _guard = span.enter();

        let tags = match registration_tags(tags) {
            Ok(tags) => tags,
            Err(err) => {
                error!("{}", err);
                return Err(err.into());
            }
        };
        let (generator, dependency_ids) = match prepare(producer, dependency_ids) {
            Ok(prepared) => prepared,
            Err(err) => {
                error!("{}", err);
                return Err(err.into());
            }
        };

        debug!(?tags, ?dependency_ids, "Registered");

        self.inner
            .registry
            .lock()
            .push(RegistrationRecord::new(tags, dependency_ids, generator));
        Ok(())
    }
}

impl Container {
    /// Invokes a callable once, resolving each of its dependencies with a separate [`Self::resolve`]
    ///
    /// # Errors
    /// - Returns [`BuildErrorKind::Producer`] if the producer isn't callable, is unrecognized or its dependency ids are unknown
    /// - Returns [`BuildErrorKind::Resolve`] if a dependency can't be resolved
    /// - Returns [`BuildErrorKind::IncorrectType`] if the result isn't a `T`
    /// - Returns [`BuildErrorKind::Instantiate`] if the producer fails
    pub fn build<T: SendSafety + SyncSafety + 'static>(&self, producer: impl Into<Producer>) -> Result<RcThreadSafety<T>, BuildErrorKind> {
        let value = self.build_inner(producer.into(), None)?;
        downcast_built(value)
    }

    /// Like [`Self::build`], with positional arguments resolved from `dependency_ids`
    ///
    /// # Errors
    /// See [`Self::build`]. A blank dependency id is reported as [`BuildErrorKind::Producer`]
    pub fn build_with_dependencies<T: SendSafety + SyncSafety + 'static>(
        &self,
        producer: impl Into<Producer>,
        dependency_ids: impl IntoTags,
    ) -> Result<RcThreadSafety<T>, BuildErrorKind> {
        let dependency_ids = tag::dependency_ids(dependency_ids).map_err(ProducerErrorKind::from)?;
        let value = self.build_inner(producer.into(), Some(dependency_ids))?;
        downcast_built(value)
    }

    /// Like [`Self::build`], without recovering the concrete type
    ///
    /// # Errors
    /// See [`Self::build`]
    pub fn build_any(&self, producer: impl Into<Producer>) -> Result<RcAnyThreadSafety, BuildErrorKind> {
        self.build_inner(producer.into(), None)
    }

    fn build_inner(&self, producer: Producer, dependency_ids: Option<Vec<Tag>>) -> Result<RcAnyThreadSafety, BuildErrorKind> {
        let span = info_span!("build", container = %self.inner.id);
        let _guard = span.enter();

        let (invocation, instantiator, dependency_ids) = match prepare(producer, dependency_ids) {
            Ok((Generator::Call { invocation, instantiator }, dependency_ids)) => (invocation, instantiator, dependency_ids),
            Ok((Generator::Value(_), _)) => {
                let err = ProducerErrorKind::Missing;
                error!("{}", err);
                return Err(err.into());
            }
            Err(err) => {
                error!("{}", err);
                return Err(err.into());
            }
        };

        let mut arguments = Vec::with_capacity(dependency_ids.len());
        for tag in dependency_ids {
            let value = self.resolve_tag(&tag)?;
            arguments.push(Argument::new(tag, value));
        }

        debug!(?invocation, "Building");

        match instantiator.call(arguments) {
            Ok(value) => Ok(value),
            Err(InstantiatorErrorKind::Deps(err)) => {
                error!("{}", err);
                Err(err.into())
            }
            Err(InstantiatorErrorKind::Factory(err)) => {
                error!("{}", err);
                Err(BuildErrorKind::Instantiate(err))
            }
        }
    }
}

impl Container {
    /// Resolves the most recent candidate for `tag` and downcasts it.
    ///
    /// Dependencies are resolved recursively from this container.
    /// Within one call, each tag is built once and shared by every producer that needs it.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::EmptyTag`] if `tag` is blank
    /// - Returns [`ResolveErrorKind::UnknownTag`] if `tag` or one of the dependencies has no candidates
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the resolved value isn't a `T`
    /// - Returns [`ResolveErrorKind::CyclicDependency`] if a producer depends on itself
    /// - Returns [`ResolveErrorKind::Instantiate`] if a producer fails
    pub fn resolve<T: SendSafety + SyncSafety + 'static>(&self, tag: &str) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
        let tag = resolution_tag(tag)?;
        let value = self.resolve_tag(&tag)?;
        downcast_resolved(&tag, value)
    }

    /// Like [`Self::resolve`], without recovering the concrete type
    ///
    /// # Errors
    /// See [`Self::resolve`]
    pub fn resolve_any(&self, tag: &str) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let tag = resolution_tag(tag)?;
        self.resolve_tag(&tag)
    }

    fn resolve_tag(&self, tag: &Tag) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let span = info_span!("resolve", tag = %tag, container = %self.inner.id);
        let _guard = span.enter();

        let mut context = ResolutionContext::new(self.clone());
        self.resolve_internal(tag, &mut context)
    }

    /// Resolves every candidate for `tag`, this container's most recent first, then inherited ones
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::EmptyTag`] if `tag` is blank
    /// - Returns [`ResolveErrorKind::NoMatches`] if `tag` has no candidates
    /// - Returns errors of [`Self::resolve`] for candidates and their dependencies
    pub fn resolve_all<T: SendSafety + SyncSafety + 'static>(&self, tag: &str) -> Result<Vec<RcThreadSafety<T>>, ResolveErrorKind> {
        let tag = resolution_tag(tag)?;
        let values = self.resolve_all_tag(tag.clone())?;
        values.into_iter().map(|value| downcast_resolved(&tag, value)).collect()
    }

    /// Like [`Self::resolve_all`], without recovering the concrete type
    ///
    /// # Errors
    /// See [`Self::resolve_all`]
    pub fn resolve_all_any(&self, tag: &str) -> Result<Vec<RcAnyThreadSafety>, ResolveErrorKind> {
        let tag = resolution_tag(tag)?;
        self.resolve_all_tag(tag)
    }

    fn resolve_all_tag(&self, tag: Tag) -> Result<Vec<RcAnyThreadSafety>, ResolveErrorKind> {
        let span = info_span!("resolve_all", tag = %tag, container = %self.inner.id);
        let _guard = span.enter();

        let candidates = self.resolution_candidates(&tag);
        if candidates.is_empty() {
            let err = ResolveErrorKind::NoMatches { tag };
            error!("{}", err);
            return Err(err);
        }
        debug!(candidates = candidates.len(), "Found candidates");

        let mut context = ResolutionContext::new(self.clone());
        let mut values = Vec::with_capacity(candidates.len());
        for record in candidates {
            if let Err(err) = context.enter(&tag) {
                error!("{}", err);
                return Err(err);
            }
            let value = self.generate(&tag, &record, &mut context)?;
            context.exit();

            context.insert(tag.clone(), value.clone());
            values.push(value);
        }
        Ok(values)
    }

    /// Candidates for `tag`: own records most recent first, then the parent's, filtered by this container's filter
    pub(crate) fn resolution_candidates(&self, tag: &str) -> Vec<RcThreadSafety<RegistrationRecord>> {
        let mut candidates = self.inner.registry.lock().candidates(tag);
        if let Some(parent) = &self.inner.parent {
            candidates.extend(parent.resolution_candidates(tag));
        }
        filter::apply(candidates, &self.inner.filter)
    }

    fn resolve_internal(&self, tag: &Tag, context: &mut ResolutionContext) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        if tag == CONTAINER_TAG {
            debug!(depth = context.depth(), "Resolved to the requesting container");
            return Ok(context.root_value());
        }

        if let Some(value) = context.built(tag) {
            debug!(%tag, depth = context.depth(), "Already built in this resolution");
            return Ok(value);
        }

        if let Err(err) = context.enter(tag) {
            error!("{}", err);
            return Err(err);
        }

        let Some(record) = self.resolution_candidates(tag).into_iter().next() else {
            let err = ResolveErrorKind::UnknownTag { tag: tag.clone() };
            error!("{}", err);
            return Err(err);
        };

        let value = self.generate(tag, &record, context)?;
        context.exit();

        debug!(%tag, depth = context.depth(), "Built");
        context.insert(tag.clone(), value.clone());
        Ok(value)
    }

    /// Calls the record's generator, resolving its dependencies through the same context
    fn generate(&self, tag: &Tag, record: &RegistrationRecord, context: &mut ResolutionContext) -> Result<RcAnyThreadSafety, ResolveErrorKind> {
        let (invocation, instantiator) = match &record.generator {
            Generator::Value(value) => return Ok(value.clone()),
            Generator::Call { invocation, instantiator } => (invocation, instantiator),
        };

        let mut arguments = Vec::with_capacity(record.dependency_ids.len());
        for dependency_id in &record.dependency_ids {
            let value = self.resolve_internal(dependency_id, context)?;
            arguments.push(Argument::new(dependency_id.clone(), value));
        }

        debug!(?invocation, depth = context.depth(), "Invoking producer");

        match instantiator.call(arguments) {
            Ok(value) => Ok(value),
            Err(InstantiatorErrorKind::Deps(err)) => {
                error!("{}", err);
                Err(err)
            }
            Err(InstantiatorErrorKind::Factory(err)) => {
                let err = ResolveErrorKind::Instantiate {
                    tag: tag.clone(),
                    source: err,
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}

impl TryFrom<RcAnyThreadSafety> for Container {
    type Error = ContainerErrorKind;

    /// Recovers a container from an erased value, e.g. one resolved through [`CONTAINER_TAG`]
    fn try_from(value: RcAnyThreadSafety) -> Result<Self, Self::Error> {
        match downcast::<Container>(value) {
            Ok(container) => Ok((*container).clone()),
            Err(_) => Err(ContainerErrorKind::InvalidParent {
                expected: TypeInfo::of::<Container>(),
            }),
        }
    }
}

impl Dependency for Container {
    fn from_argument(Argument { tag, value }: Argument) -> Result<Self, ResolveErrorKind> {
        Container::try_from(value).map_err(|_| ResolveErrorKind::IncorrectType {
            tag,
            expected: TypeInfo::of::<Container>(),
        })
    }
}

#[inline]
fn resolution_tag(tag: &str) -> Result<Tag, ResolveErrorKind> {
    Tag::new(tag).map_err(|_| {
        let err = ResolveErrorKind::EmptyTag;
        error!("{}", err);
        err
    })
}

#[inline]
fn downcast_built<T: SendSafety + SyncSafety + 'static>(value: RcAnyThreadSafety) -> Result<RcThreadSafety<T>, BuildErrorKind> {
    downcast(value).map_err(|_| {
        let err = BuildErrorKind::IncorrectType {
            expected: TypeInfo::of::<T>(),
        };
        error!("{}", err);
        err
    })
}

#[inline]
fn downcast_resolved<T: SendSafety + SyncSafety + 'static>(tag: &Tag, value: RcAnyThreadSafety) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
    downcast(value).map_err(|_| {
        let err = ResolveErrorKind::IncorrectType {
            tag: tag.clone(),
            expected: TypeInfo::of::<T>(),
        };
        error!("{}", err);
        err
    })
}
