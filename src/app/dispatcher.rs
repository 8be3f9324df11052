use crate::app::params::Args;
use crate::app::registry::{self, CallContext, Category, FunctionSpec, Handler};
use crate::utils::error::{Result, UtilkitError};
use serde_json::Value;
use std::fmt::Write as _;

/// Resolves a function name, coerces its raw arguments and runs it.
pub struct Dispatcher {
    context: CallContext,
}

impl Dispatcher {
    pub fn new(context: CallContext) -> Self {
        Self { context }
    }

    pub fn lookup(&self, name: &str) -> Result<&'static FunctionSpec> {
        registry::find(name).ok_or_else(|| UtilkitError::UnknownFunction {
            name: name.to_string(),
        })
    }

    /// Coerces `raw` against the declared parameters. Missing trailing
    /// optional arguments take their defaults.
    pub fn bind(&self, spec: &'static FunctionSpec, raw: &[String]) -> Result<Args> {
        let required = spec.required_count();
        let total = spec.params.len();
        if raw.len() < required || raw.len() > total {
            let expected = if required == total {
                total.to_string()
            } else {
                format!("{} to {}", required, total)
            };
            return Err(UtilkitError::ArityError {
                function: spec.name.to_string(),
                expected,
                got: raw.len(),
            });
        }

        let mut values = Vec::with_capacity(total);
        for (i, param) in spec.params.iter().enumerate() {
            let text = match (raw.get(i), param.default) {
                (Some(text), _) => text.as_str(),
                (None, Some(default)) => default,
                (None, None) => {
                    return Err(UtilkitError::ArityError {
                        function: spec.name.to_string(),
                        expected: required.to_string(),
                        got: raw.len(),
                    })
                }
            };
            values.push(param.coerce(text)?);
        }
        Ok(Args::new(spec.name, values))
    }

    pub async fn invoke(&self, spec: &FunctionSpec, args: &Args) -> Result<Value> {
        match spec.handler {
            Handler::Pure(run) => run(&self.context, args),
            Handler::Io(start) => Ok(start(&self.context, args)?.await),
            Handler::Predicate(check) => Ok(Value::Bool(check(args.str(0)?))),
        }
    }

    pub async fn call(&self, name: &str, raw: &[String]) -> Result<Value> {
        let spec = self.lookup(name)?;
        tracing::debug!("Dispatching {} with {} argument(s)", spec.name, raw.len());

        let args = self.bind(spec, raw)?;
        let result = self.invoke(spec, &args).await;

        match &result {
            Ok(_) => tracing::debug!("{} completed", spec.name),
            Err(e) => tracing::debug!("{} failed: {}", spec.name, e),
        }
        result
    }

    /// Every function name, one per line, grouped by category.
    pub fn list(&self) -> String {
        let mut out = String::new();
        for category in Category::ALL {
            for spec in registry::in_category(category) {
                let _ = writeln!(out, "{}", spec.name);
            }
        }
        out
    }

    /// Signatures and summaries for one category, or an overview of all
    /// categories when `category` is `None`.
    pub fn help_text(&self, category: Option<&str>) -> Result<String> {
        let mut out = String::new();
        match category {
            None => {
                let _ = writeln!(out, "Usage: utilkit <function> [args...]");
                let _ = writeln!(out, "       utilkit list");
                let _ = writeln!(out, "       utilkit help <category>");
                let _ = writeln!(out);
                let _ = writeln!(out, "Categories:");
                for category in Category::ALL {
                    let _ = writeln!(
                        out,
                        "  {:<12}{} functions",
                        category.as_str(),
                        registry::in_category(category).count()
                    );
                }
            }
            Some(name) => {
                let category = Category::parse(name).ok_or_else(|| {
                    UtilkitError::invalid_input(
                        "category",
                        format!(
                            "unknown category '{}'; expected one of {}",
                            name,
                            Category::ALL.map(|c| c.as_str()).join(", ")
                        ),
                    )
                })?;
                let _ = writeln!(out, "{} functions:", category);
                for spec in registry::in_category(category) {
                    let _ = writeln!(out, "  {}", spec.signature());
                    let _ = writeln!(out, "      {}", spec.summary);
                }
            }
        }
        Ok(out)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(CallContext::default())
    }
}

/// Strings print bare; every other value prints as JSON.
pub fn render(value: &Value, pretty: bool) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other if pretty => Ok(serde_json::to_string_pretty(other)?),
        other => Ok(serde_json::to_string(other)?),
    }
}
