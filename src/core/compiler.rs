//! Schema compilation: turns a draft-07 schema document into a [`Validator`].
//!
//! A schema compiles to a tree of checks. `$ref` compiles to a slot in an
//! arena shared by the whole compilation; the slot is registered under the
//! full reference URI before its target is compiled, which is what lets
//! self-referential schemas (the meta-schema among them) terminate.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::keywords::{self, Check};
use crate::core::meta;
use crate::domain::{pointer, uri};
use crate::utils::error::{Result, SchemaError};

#[derive(Debug)]
pub(crate) enum Compiled {
    /// A boolean schema: accept or reject everything.
    Constant(bool),
    /// An object schema: the conjunction of its keyword checks.
    Node(Vec<Check>),
    /// A `$ref`, resolved through the arena.
    Reference(usize),
}

pub(crate) fn eval_node(arena: &[Compiled], node: &Compiled, instance: &Value) -> bool {
    match node {
        Compiled::Constant(accept) => *accept,
        Compiled::Node(checks) => checks
            .iter()
            .all(|check| keywords::eval_check(arena, check, instance)),
        Compiled::Reference(slot) => eval_node(arena, &arena[*slot], instance),
    }
}

/// One compilation in flight. Owns the document registry and the arena of
/// compiled reference targets.
pub(crate) struct CompileCtx {
    /// Fragment-free URI -> schema document. Seeded with the draft-07
    /// meta-schema and the caller's remote schemas; documents gain an entry
    /// when their root `$id` is seen.
    store: HashMap<String, Arc<Value>>,
    /// Full reference URI -> arena slot, registered before the target
    /// compiles so that reference cycles close instead of recursing.
    slots: HashMap<String, usize>,
    arena: Vec<Option<Compiled>>,
    /// The document a fragment-only reference resolves against.
    current_doc: Arc<Value>,
}

impl CompileCtx {
    /// Compile `schema` under `base_uri`. A non-empty `ref_list` means we are
    /// still walking reference tokens toward the real target.
    pub(crate) fn evaluate(
        &mut self,
        schema: &Value,
        base_uri: &str,
        ref_list: &[String],
    ) -> Result<Compiled> {
        match schema {
            Value::Bool(accept) => Ok(Compiled::Constant(*accept)),
            Value::Object(obj) => {
                // `$id` re-bases every URI resolved beneath this schema.
                let current_uri = match obj.get("$id").and_then(Value::as_str) {
                    Some(id) if !id.is_empty() => uri::join(base_uri, id),
                    _ => base_uri.to_string(),
                };

                if !ref_list.is_empty() {
                    return self.walk(obj, schema, &current_uri, ref_list);
                }

                if let Some(reference) = obj.get("$ref") {
                    let reference = reference.as_str().ok_or_else(|| {
                        SchemaError::invalid_schema("'$ref' expects a string")
                    })?;
                    // All other properties in a "$ref" object are ignored
                    // (draft-07 core, section 8.3).
                    return self.resolve_reference(&current_uri, reference);
                }

                let mut checks = Vec::new();
                for (name, value) in obj {
                    if !keywords::is_known(name) {
                        // Unknown keywords are ignored.
                        continue;
                    }
                    if let Some(check) =
                        keywords::compile_keyword(self, name, value, obj, &current_uri)?
                    {
                        checks.push(check);
                    }
                }
                Ok(Compiled::Node(checks))
            }
            _ => Err(SchemaError::invalid_schema(
                "a schema must be an object or a boolean",
            )),
        }
    }

    /// Walk pending reference tokens through a schema object.
    ///
    /// A token naming a known keyword present in the object steps into that
    /// keyword's value (so `#/definitions/foo` compiles the definition as a
    /// schema); any other token sequence is evaluated as a plain JSON
    /// Pointer. Falling off the document is a schema error.
    fn walk(
        &mut self,
        obj: &Map<String, Value>,
        schema: &Value,
        current_uri: &str,
        ref_list: &[String],
    ) -> Result<Compiled> {
        let head = ref_list[0].as_str();
        if keywords::is_known(head) && obj.contains_key(head) {
            let value = &obj[head];
            let rest = &ref_list[1..];

            if rest.is_empty() {
                // The reference lands on the keyword itself; compile it as
                // the sole assertion, unless a sibling `$ref` overrides it.
                if obj.contains_key("$ref") {
                    return Ok(Compiled::Node(Vec::new()));
                }
                return match keywords::compile_keyword(self, head, value, obj, current_uri)? {
                    Some(check) => Ok(Compiled::Node(vec![check])),
                    None => Ok(Compiled::Node(Vec::new())),
                };
            }

            let token = rest[0].as_str();
            let target = match value {
                Value::Object(members) => members.get(token),
                Value::Array(items) => {
                    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
                        token.parse::<usize>().ok().and_then(|index| items.get(index))
                    } else {
                        None
                    }
                }
                _ => None,
            };
            match target {
                Some(subschema) => self.evaluate(subschema, current_uri, &rest[1..]),
                None => Err(SchemaError::invalid_schema(format!(
                    "reference walks off '{}' at token '{}'",
                    head, token
                ))),
            }
        } else {
            match pointer::evaluate_tokens(schema, ref_list) {
                Some(target) => self.evaluate(target, current_uri, &[]),
                None => Err(SchemaError::invalid_schema(format!(
                    "reference does not resolve: /{}",
                    ref_list.join("/")
                ))),
            }
        }
    }

    fn resolve_reference(&mut self, current_uri: &str, reference: &str) -> Result<Compiled> {
        let ref_uri = uri::join(current_uri, reference);
        if let Some(&slot) = self.slots.get(&ref_uri) {
            return Ok(Compiled::Reference(slot));
        }

        let (absolute, fragment) = uri::split(&ref_uri);
        let target_doc = if absolute.is_empty() {
            self.current_doc.clone()
        } else {
            self.store
                .get(absolute)
                .cloned()
                .ok_or_else(|| SchemaError::UnresolvableRef {
                    uri: ref_uri.clone(),
                })?
        };

        // Reserve the slot first so a cycle back to this URI terminates.
        let slot = self.arena.len();
        self.arena.push(None);
        self.slots.insert(ref_uri.clone(), slot);
        debug!(reference = %ref_uri, slot, "compiling reference target");

        let tokens = pointer::parse(fragment);
        let compiled = self.compile_document(target_doc, &tokens)?;
        self.arena[slot] = Some(compiled);
        Ok(Compiled::Reference(slot))
    }

    /// Compile a whole document, re-basing URIs on its root `$id` and making
    /// it the target of fragment-only references while it compiles.
    fn compile_document(&mut self, doc: Arc<Value>, ref_list: &[String]) -> Result<Compiled> {
        let base = match doc.as_ref() {
            Value::Object(obj) => obj
                .get("$id")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            _ => String::new(),
        };
        if !base.is_empty() {
            let (absolute, _) = uri::split(&base);
            if !absolute.is_empty() && !self.store.contains_key(absolute) {
                self.store.insert(absolute.to_string(), doc.clone());
            }
        }

        let saved = std::mem::replace(&mut self.current_doc, doc.clone());
        let result = self.evaluate(&doc, &base, ref_list);
        self.current_doc = saved;
        result
    }
}

/// Builder for compilation: remote schema registry and meta-validation
/// toggle. [`compile`] covers the common case.
#[derive(Debug, Clone)]
pub struct Compiler {
    remotes: HashMap<String, Value>,
    check_schema: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            remotes: HashMap::new(),
            check_schema: true,
        }
    }

    /// Register a remote schema document under the URI `$ref`s use for it.
    pub fn with_remote(mut self, uri: impl Into<String>, schema: Value) -> Self {
        self.remotes.insert(uri.into(), schema);
        self
    }

    /// Toggle meta-validation of the root schema (on by default).
    pub fn check_schema(mut self, check: bool) -> Self {
        self.check_schema = check;
        self
    }

    pub fn compile(&self, schema: &Value) -> Result<Validator> {
        if !matches!(schema, Value::Object(_) | Value::Bool(_)) {
            return Err(SchemaError::invalid_schema(
                "a schema must be an object or a boolean",
            ));
        }
        if self.check_schema && !meta::meta_validator().is_valid(schema) {
            return Err(SchemaError::invalid_schema(
                "schema does not conform to the draft-07 meta-schema",
            ));
        }

        let mut store: HashMap<String, Arc<Value>> = HashMap::new();
        store.insert(meta::DRAFT7_URI.to_string(), meta::draft7_meta_schema_arc());
        for (uri, doc) in &self.remotes {
            store.insert(uri.clone(), Arc::new(doc.clone()));
        }

        let root_doc = Arc::new(schema.clone());
        let mut ctx = CompileCtx {
            store,
            slots: HashMap::new(),
            arena: Vec::new(),
            current_doc: root_doc.clone(),
        };
        let root = ctx.compile_document(root_doc, &[])?;

        let arena = ctx
            .arena
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| {
                    SchemaError::invalid_schema("internal: reference target never compiled")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // A slot whose reference chain never reaches a constant or a keyword
        // node would recurse forever at validation time, so reject it here.
        // More hops than slots means the chain revisited one.
        for start in 0..arena.len() {
            let mut slot = start;
            let mut hops = 0;
            while let Compiled::Reference(next) = arena[slot] {
                hops += 1;
                if hops > arena.len() {
                    return Err(SchemaError::invalid_schema(
                        "reference cycle never reaches a schema",
                    ));
                }
                slot = next;
            }
        }

        debug!(references = arena.len(), "schema compiled");
        Ok(Validator {
            schema: schema.clone(),
            root,
            arena,
        })
    }
}

/// A compiled schema, immutable and reusable across instances.
#[derive(Debug)]
pub struct Validator {
    schema: Value,
    root: Compiled,
    arena: Vec<Compiled>,
}

impl Validator {
    pub fn is_valid(&self, instance: &Value) -> bool {
        eval_node(&self.arena, &self.root, instance)
    }

    /// The strict form of [`Validator::is_valid`].
    pub fn validate(&self, instance: &Value) -> Result<()> {
        if self.is_valid(instance) {
            Ok(())
        } else {
            Err(SchemaError::InvalidInstance)
        }
    }

    /// The schema this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

/// Compile with meta-validation on and no remote schemas.
pub fn compile(schema: &Value) -> Result<Validator> {
    Compiler::new().compile(schema)
}
