//! Command builder: a function together with its declared parameters and docs.

use crate::args::BoundArgs;
use crate::command::descriptor::{Callable, ParameterDescriptor};
use crate::types::{TypeTag, Value};
use futures::FutureExt;
use std::future::Future;

/// A function ready to be registered as a command.
///
/// ```
/// use targ::{Command, TypeTag};
///
/// let add = Command::sync("add", |args| {
///     let a: i64 = args.get("a")?;
///     let b: i64 = args.get("b")?;
///     println!("{}", a + b);
///     Ok(())
/// })
/// .doc("Add the two numbers.\n\n:param a: The first number.\n:param b: The second number.")
/// .param("a", TypeTag::Int)
/// .param("b", TypeTag::Int);
/// assert_eq!(add.name(), "add");
/// ```
pub struct Command {
    pub(crate) name: String,
    pub(crate) doc: String,
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) callable: Callable,
}

impl Command {
    /// Command backed by a plain function.
    pub fn sync<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&BoundArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::with_callable(name, Callable::Sync(Box::new(f)))
    }

    /// Command backed by an async function; the dispatcher runs it to completion.
    pub fn asynchronous<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(BoundArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::with_callable(name, Callable::Async(Box::new(move |args| f(args).boxed())))
    }

    fn with_callable(name: impl Into<String>, callable: Callable) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            parameters: Vec::new(),
            callable,
        }
    }

    /// Documentation block, read by the registry's doc extractor.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Required parameter.
    pub fn param(mut self, name: impl Into<String>, type_tag: TypeTag) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, type_tag));
        self
    }

    /// Parameter with a default value.
    pub fn param_default(
        mut self,
        name: impl Into<String>,
        type_tag: TypeTag,
        default: impl Into<Value>,
    ) -> Self {
        self.parameters
            .push(ParameterDescriptor::new(name, type_tag).with_default(default));
        self
    }

    /// Boolean parameter defaulting to false, spelled `--name`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.param_default(name, TypeTag::Bool, false)
    }

    /// Parameter without a declared type; receives the raw token.
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.param(name, TypeTag::Untyped)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("callable", &self.callable)
            .finish()
    }
}

/// Where a command is registered: optional group, explicit name and aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub group: Option<String>,
    pub name: Option<String>,
    pub aliases: Vec<String>,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Overrides the command's own name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }
}
