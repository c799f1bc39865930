//! SQL function registry.
//!
//! Maps the function names an ORM query may use onto Phoenix SQL. Most
//! functions are emitted as `name(args)`; the ordered-set aggregates have no
//! portable spelling and are expanded from templates.
//!
//! See <https://phoenix.apache.org/language/functions.html>.

use std::collections::HashMap;

/// Result type of a registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// Double-precision number.
    Double,
    /// Integer.
    Integer,
    /// Character string.
    String,
    /// Timestamp.
    Timestamp,
    /// Time of day.
    Time,
}

/// How a function call is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlFunction {
    /// `name(arg, ...)`.
    Standard {
        /// Function name as emitted.
        name: &'static str,
        /// Result type.
        returns: ReturnType,
    },
    /// A template in which `?1`, `?2`, ... are replaced by the arguments.
    Template {
        /// Template text.
        template: &'static str,
        /// Result type.
        returns: ReturnType,
    },
    /// A function taking no arguments, with or without empty parentheses.
    NoArg {
        /// Function name as emitted.
        name: &'static str,
        /// Result type.
        returns: ReturnType,
        /// Whether `()` follows the name.
        has_parens: bool,
    },
}

impl SqlFunction {
    /// Returns the result type.
    #[must_use]
    pub const fn returns(&self) -> ReturnType {
        match self {
            Self::Standard { returns, .. }
            | Self::Template { returns, .. }
            | Self::NoArg { returns, .. } => *returns,
        }
    }

    /// Renders a call with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::MissingArgument`] if a template references an
    /// argument that was not supplied, and
    /// [`FunctionError::UnexpectedArguments`] if a no-arg function is given
    /// arguments.
    pub fn render(&self, args: &[&str]) -> Result<String, FunctionError> {
        match self {
            Self::Standard { name, .. } => Ok(format!("{name}({})", args.join(", "))),
            Self::NoArg {
                name, has_parens, ..
            } => {
                if !args.is_empty() {
                    return Err(FunctionError::UnexpectedArguments {
                        name: String::from(*name),
                        count: args.len(),
                    });
                }
                Ok(if *has_parens {
                    format!("{name}()")
                } else {
                    String::from(*name)
                })
            }
            Self::Template { template, .. } => render_template(template, args),
        }
    }
}

fn render_template(template: &str, args: &[&str]) -> Result<String, FunctionError> {
    let mut sql = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(at) = rest.find('?') {
        sql.push_str(&rest[..at]);
        let after = &rest[at + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            sql.push('?');
            rest = after;
            continue;
        }
        let position: usize = after[..digits].parse().unwrap_or(0);
        let arg = position
            .checked_sub(1)
            .and_then(|i| args.get(i))
            .ok_or(FunctionError::MissingArgument {
                position,
                supplied: args.len(),
            })?;
        sql.push_str(arg);
        rest = &after[digits..];
    }
    sql.push_str(rest);
    Ok(sql)
}

/// Errors from rendering function calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    /// The function is not registered.
    #[error("Unknown function '{0}'")]
    Unknown(String),

    /// A template references an argument that was not supplied.
    #[error("Argument ?{position} missing ({supplied} supplied)")]
    MissingArgument {
        /// 1-based argument position referenced by the template.
        position: usize,
        /// Number of arguments supplied.
        supplied: usize,
    },

    /// A no-arg function was called with arguments.
    #[error("Function '{name}' takes no arguments ({count} supplied)")]
    UnexpectedArguments {
        /// Function name.
        name: String,
        /// Number of arguments supplied.
        count: usize,
    },
}

/// Functions available to queries, keyed by lower-case name.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, SqlFunction>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the Phoenix built-in functions.
    #[must_use]
    pub fn phoenix() -> Self {
        use ReturnType::{Double, Integer, String as Str, Time, Timestamp};

        let mut registry = Self::new();

        let templates = [
            ("percentile_cont_asc", "PERCENTILE_CONT (?1) WITHIN GROUP (ORDER BY ?2 ASC)"),
            ("percentile_cont_desc", "PERCENTILE_CONT (?1) WITHIN GROUP (ORDER BY ?2 DESC)"),
            ("percentile_disc_asc", "PERCENTILE_DISC (?1) WITHIN GROUP (ORDER BY ?2 ASC)"),
            ("percentile_disc_desc", "PERCENTILE_DISC (?1) WITHIN GROUP (ORDER BY ?2 DESC)"),
            ("percent_rank_asc", "PERCENT_RANK (?1) WITHIN GROUP (ORDER BY ?2 ASC)"),
            ("percent_rank_desc", "PERCENT_RANK (?1) WITHIN GROUP (ORDER BY ?2 DESC)"),
        ];
        for (name, template) in templates {
            registry.register(name, SqlFunction::Template { template, returns: Double });
        }

        let standard = [
            ("stddev_pop", Double),
            ("stddev_samp", Double),
            ("upper", Str),
            ("lower", Str),
            ("reverse", Str),
            ("substr", Str),
            ("instr", Integer),
            ("trim", Str),
            ("ltrim", Str),
            ("rtrim", Str),
            ("lpad", Str),
            ("length", Integer),
            ("regexp_substr", Str),
            ("regexp_replace", Str),
        ];
        for (name, returns) in standard {
            registry.register(name, SqlFunction::Standard { name, returns });
        }

        registry.register(
            "current_date",
            SqlFunction::NoArg {
                name: "current_date",
                returns: Timestamp,
                has_parens: true,
            },
        );
        registry.register(
            "current_time",
            SqlFunction::NoArg {
                name: "current_time",
                returns: Time,
                has_parens: true,
            },
        );

        registry
    }

    /// Registers `function` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, function: SqlFunction) {
        self.functions.insert(name.to_ascii_lowercase(), function);
    }

    /// Looks up a function by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlFunction> {
        self.functions.get(&name.to_ascii_lowercase())
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Renders a call to `name` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Unknown`] if `name` is not registered, or the
    /// error from [`SqlFunction::render`].
    pub fn render(&self, name: &str, args: &[&str]) -> Result<String, FunctionError> {
        self.get(name)
            .ok_or_else(|| FunctionError::Unknown(String::from(name)))?
            .render(args)
    }
}
