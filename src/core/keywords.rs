//! Draft-07 keyword set: how each keyword compiles into a [`Check`] and how a
//! compiled check judges an instance.
//!
//! Assertion keywords only constrain instances of their target primitive type.
//! `maxLength` restricts strings, so a number or an object passes it
//! vacuously; that gating lives in [`eval_check`].

use regex::Regex;
use serde_json::{Map, Value};

use crate::core::compiler::{CompileCtx, Compiled};
use crate::domain::value::{self, json_eq, JsonType};
use crate::utils::error::{Result, SchemaError};

/// Every keyword the compiler recognizes. Anything else in a schema object is
/// ignored, as draft-07 requires for unknown keywords.
pub const KNOWN_KEYWORDS: &[&str] = &[
    "definitions",
    "type",
    "enum",
    "const",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "items",
    "additionalItems",
    "maxItems",
    "minItems",
    "uniqueItems",
    "contains",
    "maxProperties",
    "minProperties",
    "required",
    "properties",
    "patternProperties",
    "additionalProperties",
    "dependencies",
    "propertyNames",
    "if",
    "then",
    "else",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
];

pub fn is_known(keyword: &str) -> bool {
    KNOWN_KEYWORDS.contains(&keyword)
}

#[derive(Debug)]
pub(crate) enum ItemsCheck {
    /// `items` held a single schema applied to every element.
    Single(Box<Compiled>),
    /// `items` held an array of schemas applied positionally.
    Tuple(Vec<Compiled>),
}

#[derive(Debug)]
pub(crate) enum Dependency {
    Keys(Vec<String>),
    Schema(Compiled),
}

#[derive(Debug)]
pub(crate) enum Check {
    Type(Vec<JsonType>),
    Enum(Vec<Value>),
    Const(Value),
    MultipleOf(f64),
    Maximum(f64),
    ExclusiveMaximum(f64),
    Minimum(f64),
    ExclusiveMinimum(f64),
    MaxLength(f64),
    MinLength(f64),
    Pattern(Regex),
    Items(ItemsCheck),
    AdditionalItems {
        inner: Box<Compiled>,
        /// Length of the sibling `items` array; `None` when `items` is absent
        /// or a single schema, which makes this keyword a no-op.
        prefix: Option<usize>,
    },
    MaxItems(f64),
    MinItems(f64),
    UniqueItems,
    Contains(Box<Compiled>),
    MaxProperties(f64),
    MinProperties(f64),
    Required(Vec<String>),
    Properties(Vec<(String, Compiled)>),
    PatternProperties(Vec<(Regex, Compiled)>),
    AdditionalProperties {
        inner: Box<Compiled>,
        /// Keys claimed by the sibling `properties` keyword.
        named: Vec<String>,
        /// Patterns of the sibling `patternProperties` keyword.
        patterns: Vec<Regex>,
    },
    Dependencies(Vec<(String, Dependency)>),
    PropertyNames(Box<Compiled>),
    IfThenElse {
        condition: Box<Compiled>,
        then: Box<Compiled>,
        otherwise: Box<Compiled>,
    },
    AllOf(Vec<Compiled>),
    AnyOf(Vec<Compiled>),
    OneOf(Vec<Compiled>),
    Not(Box<Compiled>),
}

fn number_value(keyword: &str, value: &Value) -> Result<f64> {
    value::as_number(value).ok_or_else(|| {
        SchemaError::invalid_schema(format!("'{}' expects a number, got {}", keyword, value))
    })
}

fn subschema_list(
    ctx: &mut CompileCtx,
    keyword: &str,
    value: &Value,
    uri: &str,
) -> Result<Vec<Compiled>> {
    let items = value.as_array().ok_or_else(|| {
        SchemaError::invalid_schema(format!("'{}' expects an array of schemas", keyword))
    })?;
    items
        .iter()
        .map(|subschema| ctx.evaluate(subschema, uri, &[]))
        .collect()
}

/// Compile one keyword of `schema` into a check. `Ok(None)` means the keyword
/// asserts nothing on its own (`definitions`, and `then`/`else`, which are
/// wired up by `if`).
pub(crate) fn compile_keyword(
    ctx: &mut CompileCtx,
    keyword: &str,
    value: &Value,
    schema: &Map<String, Value>,
    uri: &str,
) -> Result<Option<Check>> {
    let check = match keyword {
        "definitions" | "then" | "else" => return Ok(None),

        "type" => {
            let names: Vec<&str> = match value {
                Value::String(name) => vec![name.as_str()],
                Value::Array(names) => names
                    .iter()
                    .map(|name| {
                        name.as_str().ok_or_else(|| {
                            SchemaError::invalid_schema("'type' array entries must be strings")
                        })
                    })
                    .collect::<Result<_>>()?,
                _ => {
                    return Err(SchemaError::invalid_schema(
                        "'type' expects a string or an array of strings",
                    ))
                }
            };
            let types = names
                .into_iter()
                .map(|name| {
                    JsonType::from_name(name).ok_or_else(|| {
                        SchemaError::invalid_schema(format!("unknown type name '{}'", name))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Check::Type(types)
        }

        "enum" => {
            let values = value
                .as_array()
                .filter(|values| !values.is_empty())
                .ok_or_else(|| {
                    SchemaError::invalid_schema("'enum' expects a non-empty array")
                })?;
            Check::Enum(values.clone())
        }

        "const" => Check::Const(value.clone()),

        "multipleOf" => Check::MultipleOf(number_value(keyword, value)?),
        "maximum" => Check::Maximum(number_value(keyword, value)?),
        "exclusiveMaximum" => Check::ExclusiveMaximum(number_value(keyword, value)?),
        "minimum" => Check::Minimum(number_value(keyword, value)?),
        "exclusiveMinimum" => Check::ExclusiveMinimum(number_value(keyword, value)?),

        "maxLength" => Check::MaxLength(number_value(keyword, value)?),
        "minLength" => Check::MinLength(number_value(keyword, value)?),

        "pattern" => {
            let pattern = value
                .as_str()
                .ok_or_else(|| SchemaError::invalid_schema("'pattern' expects a string"))?;
            Check::Pattern(Regex::new(pattern)?)
        }

        "items" => match value {
            Value::Array(subschemas) => {
                let compiled = subschemas
                    .iter()
                    .map(|subschema| ctx.evaluate(subschema, uri, &[]))
                    .collect::<Result<Vec<_>>>()?;
                Check::Items(ItemsCheck::Tuple(compiled))
            }
            _ => Check::Items(ItemsCheck::Single(Box::new(ctx.evaluate(value, uri, &[])?))),
        },

        "additionalItems" => {
            let inner = Box::new(ctx.evaluate(value, uri, &[])?);
            let prefix = schema
                .get("items")
                .and_then(Value::as_array)
                .map(|items| items.len());
            Check::AdditionalItems { inner, prefix }
        }

        "maxItems" => Check::MaxItems(number_value(keyword, value)?),
        "minItems" => Check::MinItems(number_value(keyword, value)?),

        "uniqueItems" => match value {
            Value::Bool(true) => Check::UniqueItems,
            Value::Bool(false) => return Ok(None),
            _ => return Err(SchemaError::invalid_schema("'uniqueItems' expects a boolean")),
        },

        "contains" => Check::Contains(Box::new(ctx.evaluate(value, uri, &[])?)),

        "maxProperties" => Check::MaxProperties(number_value(keyword, value)?),
        "minProperties" => Check::MinProperties(number_value(keyword, value)?),

        "required" => {
            let keys = value
                .as_array()
                .ok_or_else(|| SchemaError::invalid_schema("'required' expects an array"))?
                .iter()
                .map(|key| {
                    key.as_str().map(str::to_string).ok_or_else(|| {
                        SchemaError::invalid_schema("'required' entries must be strings")
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Check::Required(keys)
        }

        "properties" => {
            let members = value
                .as_object()
                .ok_or_else(|| SchemaError::invalid_schema("'properties' expects an object"))?;
            let compiled = members
                .iter()
                .map(|(key, subschema)| {
                    Ok((key.clone(), ctx.evaluate(subschema, uri, &[])?))
                })
                .collect::<Result<Vec<_>>>()?;
            Check::Properties(compiled)
        }

        "patternProperties" => {
            let members = value.as_object().ok_or_else(|| {
                SchemaError::invalid_schema("'patternProperties' expects an object")
            })?;
            let compiled = members
                .iter()
                .map(|(pattern, subschema)| {
                    Ok((Regex::new(pattern)?, ctx.evaluate(subschema, uri, &[])?))
                })
                .collect::<Result<Vec<_>>>()?;
            Check::PatternProperties(compiled)
        }

        "additionalProperties" => {
            let inner = Box::new(ctx.evaluate(value, uri, &[])?);
            let named = schema
                .get("properties")
                .and_then(Value::as_object)
                .map(|members| members.keys().cloned().collect())
                .unwrap_or_default();
            let patterns = schema
                .get("patternProperties")
                .and_then(Value::as_object)
                .map(|members| {
                    members
                        .keys()
                        .map(|pattern| Regex::new(pattern).map_err(SchemaError::from))
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?
                .unwrap_or_default();
            Check::AdditionalProperties {
                inner,
                named,
                patterns,
            }
        }

        "dependencies" => {
            let members = value
                .as_object()
                .ok_or_else(|| SchemaError::invalid_schema("'dependencies' expects an object"))?;
            let mut compiled = Vec::with_capacity(members.len());
            for (key, dependency) in members {
                let dependency = match dependency {
                    Value::Array(keys) => Dependency::Keys(
                        keys.iter()
                            .map(|key| {
                                key.as_str().map(str::to_string).ok_or_else(|| {
                                    SchemaError::invalid_schema(
                                        "'dependencies' property lists must hold strings",
                                    )
                                })
                            })
                            .collect::<Result<Vec<_>>>()?,
                    ),
                    Value::Object(_) | Value::Bool(_) => {
                        Dependency::Schema(ctx.evaluate(dependency, uri, &[])?)
                    }
                    _ => {
                        return Err(SchemaError::invalid_schema(
                            "'dependencies' entries must be schemas or property lists",
                        ))
                    }
                };
                compiled.push((key.clone(), dependency));
            }
            Check::Dependencies(compiled)
        }

        "propertyNames" => Check::PropertyNames(Box::new(ctx.evaluate(value, uri, &[])?)),

        "if" => {
            let accept_all = Value::Bool(true);
            let condition = Box::new(ctx.evaluate(value, uri, &[])?);
            let then = Box::new(ctx.evaluate(schema.get("then").unwrap_or(&accept_all), uri, &[])?);
            let otherwise =
                Box::new(ctx.evaluate(schema.get("else").unwrap_or(&accept_all), uri, &[])?);
            Check::IfThenElse {
                condition,
                then,
                otherwise,
            }
        }

        "allOf" => Check::AllOf(subschema_list(ctx, keyword, value, uri)?),
        "anyOf" => Check::AnyOf(subschema_list(ctx, keyword, value, uri)?),
        "oneOf" => Check::OneOf(subschema_list(ctx, keyword, value, uri)?),

        "not" => match value {
            Value::Object(_) | Value::Bool(_) => {
                Check::Not(Box::new(ctx.evaluate(value, uri, &[])?))
            }
            _ => return Err(SchemaError::invalid_schema("'not' expects a schema")),
        },

        other => {
            return Err(SchemaError::invalid_schema(format!(
                "unrecognized keyword '{}' reached the compiler",
                other
            )))
        }
    };
    Ok(Some(check))
}

/// Judge one check against an instance. `arena` backs `$ref` nodes.
pub(crate) fn eval_check(arena: &[Compiled], check: &Check, instance: &Value) -> bool {
    let eval = |node: &Compiled, instance: &Value| crate::core::compiler::eval_node(arena, node, instance);

    match check {
        Check::Type(types) => types.iter().any(|json_type| json_type.matches(instance)),
        Check::Enum(values) => values.iter().any(|value| json_eq(value, instance)),
        Check::Const(value) => json_eq(value, instance),

        Check::MultipleOf(divisor) => match value::as_number(instance) {
            Some(number) => {
                let quotient = number / divisor;
                quotient.is_finite() && quotient.fract() == 0.0
            }
            None => true,
        },
        Check::Maximum(limit) => value::as_number(instance).map_or(true, |n| n <= *limit),
        Check::ExclusiveMaximum(limit) => value::as_number(instance).map_or(true, |n| n < *limit),
        Check::Minimum(limit) => value::as_number(instance).map_or(true, |n| n >= *limit),
        Check::ExclusiveMinimum(limit) => value::as_number(instance).map_or(true, |n| n > *limit),

        // Lengths count Unicode code points, not bytes.
        Check::MaxLength(limit) => instance
            .as_str()
            .map_or(true, |s| (s.chars().count() as f64) <= *limit),
        Check::MinLength(limit) => instance
            .as_str()
            .map_or(true, |s| (s.chars().count() as f64) >= *limit),
        Check::Pattern(pattern) => instance.as_str().map_or(true, |s| pattern.is_match(s)),

        Check::Items(items) => instance.as_array().map_or(true, |elements| match items {
            ItemsCheck::Single(inner) => elements.iter().all(|element| eval(inner, element)),
            ItemsCheck::Tuple(inners) => inners
                .iter()
                .zip(elements.iter())
                .all(|(inner, element)| eval(inner, element)),
        }),
        Check::AdditionalItems { inner, prefix } => match (instance.as_array(), prefix) {
            (Some(elements), Some(prefix)) if elements.len() > *prefix => elements[*prefix..]
                .iter()
                .all(|element| eval(inner, element)),
            _ => true,
        },
        Check::MaxItems(limit) => instance
            .as_array()
            .map_or(true, |elements| (elements.len() as f64) <= *limit),
        Check::MinItems(limit) => instance
            .as_array()
            .map_or(true, |elements| (elements.len() as f64) >= *limit),
        Check::UniqueItems => instance.as_array().map_or(true, |elements| {
            for (index, a) in elements.iter().enumerate() {
                for b in &elements[index + 1..] {
                    if json_eq(a, b) {
                        return false;
                    }
                }
            }
            true
        }),
        Check::Contains(inner) => instance
            .as_array()
            .map_or(true, |elements| elements.iter().any(|element| eval(inner, element))),

        Check::MaxProperties(limit) => instance
            .as_object()
            .map_or(true, |members| (members.len() as f64) <= *limit),
        Check::MinProperties(limit) => instance
            .as_object()
            .map_or(true, |members| (members.len() as f64) >= *limit),
        Check::Required(keys) => instance
            .as_object()
            .map_or(true, |members| keys.iter().all(|key| members.contains_key(key))),
        Check::Properties(properties) => instance.as_object().map_or(true, |members| {
            properties.iter().all(|(key, inner)| {
                members.get(key).map_or(true, |member| eval(inner, member))
            })
        }),
        Check::PatternProperties(patterns) => instance.as_object().map_or(true, |members| {
            patterns.iter().all(|(pattern, inner)| {
                members
                    .iter()
                    .filter(|(key, _)| pattern.is_match(key.as_str()))
                    .all(|(_, member)| eval(inner, member))
            })
        }),
        Check::AdditionalProperties {
            inner,
            named,
            patterns,
        } => instance.as_object().map_or(true, |members| {
            members
                .iter()
                .filter(|(key, _)| !named.contains(*key))
                .filter(|(key, _)| !patterns.iter().any(|pattern| pattern.is_match(key.as_str())))
                .all(|(_, member)| eval(inner, member))
        }),
        Check::Dependencies(dependencies) => instance.as_object().map_or(true, |members| {
            dependencies.iter().all(|(key, dependency)| {
                if !members.contains_key(key) {
                    return true;
                }
                match dependency {
                    Dependency::Keys(keys) => keys.iter().all(|key| members.contains_key(key)),
                    Dependency::Schema(inner) => eval(inner, instance),
                }
            })
        }),
        Check::PropertyNames(inner) => instance.as_object().map_or(true, |members| {
            members
                .keys()
                .all(|key| eval(inner, &Value::String(key.clone())))
        }),

        Check::IfThenElse {
            condition,
            then,
            otherwise,
        } => {
            if eval(condition, instance) {
                eval(then, instance)
            } else {
                eval(otherwise, instance)
            }
        }
        Check::AllOf(inners) => inners.iter().all(|inner| eval(inner, instance)),
        Check::AnyOf(inners) => inners.iter().any(|inner| eval(inner, instance)),
        Check::OneOf(inners) => {
            inners.iter().filter(|inner| eval(inner, instance)).count() == 1
        }
        Check::Not(inner) => !eval(inner, instance),
    }
}
