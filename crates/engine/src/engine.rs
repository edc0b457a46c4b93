//! Path evaluation: scan each segment read-only, then visit its matches mutably.
use crate::config::EngineConfig;
use crate::error::XpathError;
use crate::location::{Location, Slot};
use crate::path::{self, Relation, Selector, Step};
use crate::visitor::{Visit, VisitFlow, Visitor};
use crate::visitors::{DebugVisitor, NullVisitor};
use jxpath_context::{ContextId, Contexts};
use jxpath_filter::{Environment, Filter, FilterFunction};
use serde_json::Value;

/// One selected node: where it was and what it was when its segment was scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub location: Location,
    pub value: Value,
}

/// The values of a result list, in order.
pub fn values(matches: &[Match]) -> Vec<&Value> {
    matches.iter().map(|m| &m.value).collect()
}

/// Evaluates `path` with a default engine.
pub fn evaluate<V: Visitor + ?Sized>(
    tree: &mut Value,
    path: &str,
    visitor: &mut V,
) -> Result<Vec<Match>, XpathError> {
    JsonXpath::new().evaluate(tree, path, visitor)
}

/// Selects the nodes `path` matches, without visiting.
pub fn select(tree: &Value, path: &str) -> Result<Vec<Match>, XpathError> {
    JsonXpath::new().select(tree, path)
}

/// The tree being evaluated. Shared trees are scanned but never visited.
enum Tree<'t> {
    Shared(&'t Value),
    Exclusive(&'t mut Value),
}

impl Tree<'_> {
    fn view(&self) -> &Value {
        match self {
            Tree::Shared(tree) => tree,
            Tree::Exclusive(tree) => tree,
        }
    }
}

/// A field hit before array flattening.
struct Hit<'t> {
    location: Location,
    value: &'t Value,
}

/// A structural match awaiting filtering.
struct Candidate<'t> {
    parent: Location,
    slot: Slot,
    value: &'t Value,
}

/// A match that survived its segment, detached from the tree so the tree can be mutated.
struct Pair {
    parent: Location,
    slot: Slot,
    value: Value,
}

impl Pair {
    fn location(&self) -> Location {
        self.parent.child(self.slot.clone())
    }
}

impl From<Candidate<'_>> for Pair {
    fn from(candidate: Candidate<'_>) -> Self {
        Self {
            parent: candidate.parent,
            slot: candidate.slot,
            value: candidate.value.clone(),
        }
    }
}

impl From<Pair> for Match {
    fn from(pair: Pair) -> Self {
        Self {
            location: pair.location(),
            value: pair.value,
        }
    }
}

/// The result of scanning one segment.
struct Scan {
    pairs: Vec<Pair>,
    /// Indexed segments are neither filtered nor visited.
    visitable: bool,
}

/// An evaluator holding the configuration and the filter environment.
#[derive(Debug, Clone)]
pub struct JsonXpath {
    config: EngineConfig,
    environment: Environment,
}

impl Default for JsonXpath {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl JsonXpath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            environment: Environment::default().with_regex_cache_capacity(config.regex_cache_capacity),
        }
    }

    /// Makes `name(...)` callable from filters.
    pub fn with_function(mut self, name: &str, function: FilterFunction) -> Self {
        self.environment.functions.register(name, function);
        self
    }

    /// Binds a constant visible to filters.
    pub fn with_binding(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.environment.bindings.insert(name.to_string(), value.into());
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates `path` against `tree`, handing every accepted match of the
    /// last segment to `visitor`. A fresh root context named after the path
    /// is created for the call.
    pub fn evaluate<V: Visitor + ?Sized>(
        &self,
        tree: &mut Value,
        path: &str,
        visitor: &mut V,
    ) -> Result<Vec<Match>, XpathError> {
        let mut contexts = Contexts::new();
        let root = contexts.create(Some(path));
        self.evaluate_in(tree, path, visitor, &mut contexts, root)
    }

    /// Like [`evaluate`](Self::evaluate), inside an existing context.
    pub fn evaluate_in<V: Visitor + ?Sized>(
        &self,
        tree: &mut Value,
        path: &str,
        visitor: &mut V,
        contexts: &mut Contexts,
        context: ContextId,
    ) -> Result<Vec<Match>, XpathError> {
        log::debug!("XPath: {}", path);
        let parsed = path::parse(path)?;
        self.walk(
            &mut Tree::Exclusive(tree),
            &Location::root(),
            parsed.steps(),
            visitor,
            contexts,
            context,
            path,
            0,
        )
    }

    /// Read-only evaluation. No visitor runs.
    pub fn select(&self, tree: &Value, path: &str) -> Result<Vec<Match>, XpathError> {
        log::debug!("XPath (select): {}", path);
        let parsed = path::parse(path)?;
        let mut contexts = Contexts::new();
        let root = contexts.create(Some(path));
        self.walk(
            &mut Tree::Shared(tree),
            &Location::root(),
            parsed.steps(),
            &mut NullVisitor,
            &mut contexts,
            root,
            path,
            0,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn walk<V: Visitor + ?Sized>(
        &self,
        tree: &mut Tree<'_>,
        base: &Location,
        steps: &[Step],
        visitor: &mut V,
        contexts: &mut Contexts,
        context: ContextId,
        path: &str,
        depth: usize,
    ) -> Result<Vec<Match>, XpathError> {
        if depth > self.config.max_depth {
            return Err(XpathError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        let Some((step, rest)) = steps.split_first() else {
            return Ok(Vec::new());
        };

        let scan = self.scan(tree.view(), base, step)?;

        if rest.is_empty() {
            if scan.visitable {
                visit_pairs(tree, &scan.pairs, visitor, contexts, context);
            }
            return Ok(scan.pairs.into_iter().map(Match::from).collect());
        }

        if scan.visitable {
            let mut debug = DebugVisitor::new(path);
            visit_pairs(tree, &scan.pairs, &mut debug, contexts, context);
        }

        let mut matches = Vec::new();
        for pair in &scan.pairs {
            let location = pair.location();
            log::debug!("Breadth node at {}: {}", location, pair.value);
            let sub_context = contexts.create_sub_context(context, &step.segment.field);
            matches.extend(self.walk(
                tree,
                &location,
                rest,
                visitor,
                contexts,
                sub_context,
                path,
                depth + 1,
            )?);
        }
        Ok(matches)
    }

    /// Resolves one step at `base`, flattening arrays and applying the selector.
    fn scan(&self, root: &Value, base: &Location, step: &Step) -> Result<Scan, XpathError> {
        let Some(base_node) = base.resolve(root) else {
            log::debug!("Base {} no longer resolves; nothing to scan", base);
            return Ok(Scan {
                pairs: Vec::new(),
                visitable: false,
            });
        };

        let field = step.segment.field.as_str();
        let mut hits = Vec::new();
        match step.relation {
            Relation::Child => child_hits(base_node, base, field, &mut hits),
            Relation::Descendant => {
                let mut trail = base.slots().to_vec();
                self.descendant_hits(base_node, &mut trail, field, &mut hits)?;
            }
        }

        let scan = match &step.segment.selector {
            Some(Selector::Index(position)) => Scan {
                pairs: index_hits(hits, *position).map(Pair::from).collect(),
                visitable: false,
            },
            Some(Selector::Filter(source)) => {
                let filter = Filter::compile(source).map_err(|e| XpathError::filter(source, e))?;
                let mut pairs = Vec::new();
                for candidate in flatten(hits) {
                    let accepted = filter
                        .matches(candidate.value, &self.environment)
                        .map_err(|e| XpathError::filter(source, e))?;
                    if accepted {
                        pairs.push(Pair::from(candidate));
                    } else {
                        log::debug!("Skipping {} for filter [{}]", candidate.value, source);
                    }
                }
                Scan {
                    pairs,
                    visitable: true,
                }
            }
            None => Scan {
                pairs: flatten(hits).map(Pair::from).collect(),
                visitable: true,
            },
        };
        Ok(scan)
    }

    /// Collects the values of every `field` key below `node`, depth first.
    /// A matching key's value is not searched further.
    fn descendant_hits<'t>(
        &self,
        node: &'t Value,
        trail: &mut Vec<Slot>,
        field: &str,
        hits: &mut Vec<Hit<'t>>,
    ) -> Result<(), XpathError> {
        if trail.len() > self.config.max_depth {
            return Err(XpathError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        match node {
            Value::Object(map) => {
                for (key, value) in map {
                    trail.push(Slot::Key(key.clone()));
                    if key == field {
                        hits.push(Hit {
                            location: trail.iter().cloned().collect(),
                            value,
                        });
                    } else {
                        self.descendant_hits(value, trail, field, hits)?;
                    }
                    trail.pop();
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    trail.push(Slot::Index(i));
                    self.descendant_hits(item, trail, field, hits)?;
                    trail.pop();
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Direct fields of an object base, or of each object element of an array base.
fn child_hits<'t>(base_node: &'t Value, base: &Location, field: &str, hits: &mut Vec<Hit<'t>>) {
    let key = || Slot::Key(field.to_string());
    match base_node {
        Value::Object(map) => {
            if let Some(value) = map.get(field) {
                hits.push(Hit {
                    location: base.child(key()),
                    value,
                });
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if let Some(value) = item.as_object().and_then(|map| map.get(field)) {
                    hits.push(Hit {
                        location: base.child(Slot::Index(i)).child(key()),
                        value,
                    });
                }
            }
        }
        _ => {}
    }
}

/// Every element of an array hit is its own candidate, with the array as parent.
fn flatten(hits: Vec<Hit<'_>>) -> impl Iterator<Item = Candidate<'_>> {
    hits.into_iter().flat_map(|hit| {
        let candidates: Vec<Candidate<'_>> = match hit.value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, value)| Candidate {
                    parent: hit.location.clone(),
                    slot: Slot::Index(i),
                    value,
                })
                .collect(),
            value => hit
                .location
                .split_last()
                .map(|(parent, slot)| Candidate {
                    parent,
                    slot: slot.clone(),
                    value,
                })
                .into_iter()
                .collect(),
        };
        candidates
    })
}

/// The `position`-th element of each array hit. Anything else resolves to nothing.
fn index_hits(hits: Vec<Hit<'_>>, position: Option<usize>) -> impl Iterator<Item = Candidate<'_>> {
    hits.into_iter().filter_map(move |hit| {
        let i = position?;
        let value = hit.value.as_array()?.get(i)?;
        Some(Candidate {
            parent: hit.location,
            slot: Slot::Index(i),
            value,
        })
    })
}

fn visit_pairs<V: Visitor + ?Sized>(
    tree: &mut Tree<'_>,
    pairs: &[Pair],
    visitor: &mut V,
    contexts: &mut Contexts,
    context: ContextId,
) {
    let Tree::Exclusive(root) = tree else {
        return;
    };

    for pair in pairs {
        let Some(parent) = pair.parent.resolve_mut(root) else {
            log::debug!("Parent {} was removed by an earlier visit; skipping", pair.parent);
            continue;
        };
        let Some(slot) = current_slot(parent, &pair.slot, &pair.value) else {
            log::debug!("{} is no longer in {}; skipping", pair.value, pair.parent);
            continue;
        };
        let flow = visitor.visit(
            contexts.handle(context),
            Visit {
                parent,
                slot: &slot,
                matched: &pair.value,
            },
        );
        match flow {
            VisitFlow::Continue => {}
            VisitFlow::Skip { reason } => {
                log::warn!("Skipping visit of {} at {}: {}", pair.value, pair.location(), reason);
            }
            VisitFlow::Stop => {
                log::debug!("Visitor stopped the traversal at {}", pair.location());
                break;
            }
        }
    }
}

/// Where `snapshot` sits in `parent` now. Keys stay put, but array indices
/// shift when earlier visits remove or insert elements.
fn current_slot(parent: &Value, slot: &Slot, snapshot: &Value) -> Option<Slot> {
    match (slot, parent) {
        (Slot::Index(i), Value::Array(items)) if items.get(*i) != Some(snapshot) => {
            items.iter().position(|item| item == snapshot).map(Slot::Index)
        }
        _ => Some(slot.clone()),
    }
}
