//! Command-line override schema and resolution.
//!
//! Recognized options are declared once, statically, as an explicit schema. Each option
//! maps to one parameter of one component kind. The resolver parses raw option strings into
//! the parameter's semantic type and applies them to a copy of a `ParameterSet`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::common::{AssemblyError, ByteSize, Result};
use crate::soc::kind::ComponentKind;
use crate::soc::params::{ParamType, ParamValue, ParameterSet};

/// Raw overrides keyed by option name (without leading dashes), e.g. `"l1d_size" -> "128KiB"`.
pub type Overrides = BTreeMap<String, String>;

/// One recognized command-line option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Option name without leading dashes.
    pub option: &'static str,
    /// Component kind the option configures.
    pub kind: ComponentKind,
    /// Parameter of that kind that the option replaces.
    pub param: &'static str,
    /// Help text shown by the command line.
    pub help: &'static str,
}

/// Options understood by the default resolver.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        option: "l1i_size",
        kind: ComponentKind::L1InstructionCache,
        param: "size",
        help: "L1 instruction cache size. Default: 16KiB",
    },
    OptionSpec {
        option: "l1d_size",
        kind: ComponentKind::L1DataCache,
        param: "size",
        help: "L1 data cache size. Default: 64KiB",
    },
    OptionSpec {
        option: "l1d_assoc",
        kind: ComponentKind::L1DataCache,
        param: "assoc",
        help: "L1 data cache associativity",
    },
    OptionSpec {
        option: "l1d_tagl",
        kind: ComponentKind::L1DataCache,
        param: "tag_latency",
        help: "L1 data cache tag latency",
    },
    OptionSpec {
        option: "l1d_datl",
        kind: ComponentKind::L1DataCache,
        param: "data_latency",
        help: "L1 data cache data latency",
    },
    OptionSpec {
        option: "l2_size",
        kind: ComponentKind::L2Cache,
        param: "size",
        help: "L2 cache size. Default: 256KiB",
    },
];

/// Applies raw command-line overrides to parameter sets.
///
/// # Examples
///
/// ```
/// use memsys_core::soc::{ComponentKind, OverrideResolver, Overrides, ParameterSet};
///
/// let resolver = OverrideResolver::new();
/// let defaults = ParameterSet::with_defaults(ComponentKind::L1DataCache);
/// let overrides = Overrides::from([
///     ("l1d_size".to_string(), "128KiB".to_string()),
///     ("l1d_assoc".to_string(), "2".to_string()),
/// ]);
///
/// let resolved = resolver.resolve(&defaults, &overrides).unwrap();
/// assert_eq!(resolved.size("size").unwrap().bytes(), 131072);
/// assert_eq!(resolved.integer("assoc"), Some(2));
/// assert_eq!(resolved.integer("tag_latency"), Some(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OverrideResolver {
    schema: &'static [OptionSpec],
}

impl Default for OverrideResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideResolver {
    /// Creates a resolver over the built-in option schema.
    pub const fn new() -> Self {
        Self { schema: OPTIONS }
    }

    /// Creates a resolver over a caller-supplied schema.
    pub const fn with_schema(schema: &'static [OptionSpec]) -> Self {
        Self { schema }
    }

    /// The option schema in use.
    pub const fn schema(&self) -> &'static [OptionSpec] {
        self.schema
    }

    /// Looks up an option by name.
    pub fn option(&self, name: &str) -> Option<&'static OptionSpec> {
        self.schema.iter().find(|o| o.option == name)
    }

    /// Options that configure `kind`.
    pub fn options_for(&self, kind: ComponentKind) -> impl Iterator<Item = &'static OptionSpec> {
        self.schema.iter().filter(move |o| o.kind == kind)
    }

    /// Splits a flat override map into one map per component kind.
    ///
    /// Keys that are not in the schema are dropped.
    pub fn partition(&self, overrides: &Overrides) -> BTreeMap<ComponentKind, Overrides> {
        let mut per_kind: BTreeMap<ComponentKind, Overrides> = BTreeMap::new();
        for (key, raw) in overrides {
            match self.option(key) {
                Some(spec) => {
                    let _ = per_kind
                        .entry(spec.kind)
                        .or_default()
                        .insert(key.clone(), raw.clone());
                }
                None => debug!(option = %key, "ignoring unrecognized override"),
            }
        }
        per_kind
    }

    /// Returns a copy of `params` with every matching override applied.
    ///
    /// Only options whose kind matches `params.kind()` are considered; anything else in
    /// `overrides` is ignored. The input set is never modified.
    ///
    /// # Errors
    ///
    /// `ParseError` naming the option and raw value if a value does not parse; any error
    /// from [`ParameterSet::set`] if the schema names a parameter the kind lacks.
    pub fn resolve(&self, params: &ParameterSet, overrides: &Overrides) -> Result<ParameterSet> {
        let mut resolved = params.clone();
        for spec in self.options_for(params.kind()) {
            let Some(raw) = overrides.get(spec.option) else {
                continue;
            };
            let declared = resolved.declared_type(spec.param).ok_or_else(|| {
                AssemblyError::UnknownParameter {
                    kind: spec.kind,
                    name: spec.param.to_string(),
                }
            })?;
            let value = parse_value(spec.option, declared, raw)?;
            resolved.set(spec.param, value)?;
            debug!(
                option = spec.option,
                kind = %spec.kind,
                param = spec.param,
                %value,
                "applied override"
            );
        }
        Ok(resolved)
    }
}

/// Parses a raw option string into a value of type `ty`.
///
/// # Errors
///
/// `ParseError` naming `option` and `raw` if the string is not a valid value of `ty`.
pub fn parse_value(option: &str, ty: ParamType, raw: &str) -> Result<ParamValue> {
    let parse_error = |reason: String| AssemblyError::ParseError {
        option: option.to_string(),
        value: raw.to_string(),
        reason,
    };
    match ty {
        ParamType::Size => raw
            .parse::<ByteSize>()
            .map(ParamValue::Size)
            .map_err(|e| parse_error(e.to_string())),
        ParamType::Cycles | ParamType::Count => {
            let n = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| parse_error("expected an unsigned integer".to_string()))?;
            Ok(if ty == ParamType::Cycles {
                ParamValue::Cycles(n)
            } else {
                ParamValue::Count(n)
            })
        }
    }
}
