//! Text step language for building traversals at runtime
//!
//! One step per token, e.g. `V out:knows has:age:gt:30 values:name`.

use crate::error::{PipeError, PipeResult};
use crate::pipe::{Path, PathItem, Pipe};
use crate::stats::RunningStats;
use crate::traversal::Traversal;
use sluice_core::{Comparison, EdgeRef, PropertyGraph, Value, VertexRef};
use std::str::FromStr;
use std::sync::Arc;

/// A parsed traversal step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Vertices,
    Edges,
    OutE(Vec<String>),
    InE(Vec<String>),
    BothE(Vec<String>),
    Out(Vec<String>),
    In(Vec<String>),
    Both(Vec<String>),
    OutV,
    InV,
    BothV,
    Label { comparison: Comparison, label: String },
    Has { key: String, comparison: Comparison, value: Value },
    Values(Vec<String>),
    Properties(Vec<String>),
    StdDev,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertices => "V",
            Self::Edges => "E",
            Self::OutE(_) => "outE",
            Self::InE(_) => "inE",
            Self::BothE(_) => "bothE",
            Self::Out(_) => "out",
            Self::In(_) => "in",
            Self::Both(_) => "both",
            Self::OutV => "outV",
            Self::InV => "inV",
            Self::BothV => "bothV",
            Self::Label { .. } => "label",
            Self::Has { .. } => "has",
            Self::Values(_) => "values",
            Self::Properties(_) => "properties",
            Self::StdDev => "stddev",
        }
    }
}

fn split_list(args: Option<&str>) -> Vec<String> {
    args.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn invalid(step: &str, reason: impl Into<String>) -> PipeError {
    PipeError::InvalidStepArgument {
        step: step.to_string(),
        reason: reason.into(),
    }
}

fn no_args(step: &str, args: Option<&str>) -> PipeResult<()> {
    match args {
        Some(_) => Err(invalid(step, "takes no arguments")),
        None => Ok(()),
    }
}

impl FromStr for Step {
    type Err = PipeError;

    fn from_str(s: &str) -> PipeResult<Self> {
        let (name, args) = match s.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (s, None),
        };

        let step = match name {
            "V" => no_args(name, args).map(|_| Self::Vertices)?,
            "E" => no_args(name, args).map(|_| Self::Edges)?,
            "outE" => Self::OutE(split_list(args)),
            "inE" => Self::InE(split_list(args)),
            "bothE" => Self::BothE(split_list(args)),
            "out" => Self::Out(split_list(args)),
            "in" => Self::In(split_list(args)),
            "both" => Self::Both(split_list(args)),
            "outV" => no_args(name, args).map(|_| Self::OutV)?,
            "inV" => no_args(name, args).map(|_| Self::InV)?,
            "bothV" => no_args(name, args).map(|_| Self::BothV)?,
            "label" => {
                let (op, label) = args
                    .and_then(|a| a.split_once(':'))
                    .ok_or_else(|| invalid(name, "expected label:<op>:<label>"))?;
                Self::Label {
                    comparison: op.parse()?,
                    label: label.to_string(),
                }
            }
            "has" => {
                let mut parts = args.unwrap_or_default().splitn(3, ':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(key), Some(op), Some(value)) if !key.is_empty() => Self::Has {
                        key: key.to_string(),
                        comparison: op.parse()?,
                        value: Value::from_literal(value),
                    },
                    _ => return Err(invalid(name, "expected has:<key>:<op>:<value>")),
                }
            }
            "values" => Self::Values(split_list(args)),
            "properties" => Self::Properties(split_list(args)),
            "stddev" => no_args(name, args).map(|_| Self::StdDev)?,
            _ => return Err(PipeError::UnknownStep(s.to_string())),
        };
        Ok(step)
    }
}

fn as_strs(keys: &[String]) -> Vec<&str> {
    keys.iter().map(String::as_str).collect()
}

/// A traversal together with the kind of element it currently emits
pub enum Stage<'g> {
    Graph(Traversal<'g, &'g PropertyGraph>),
    Vertices(Traversal<'g, VertexRef<'g>>),
    Edges(Traversal<'g, EdgeRef<'g>>),
    Values(Traversal<'g, Value>),
}

impl<'g> Stage<'g> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Graph(_) => "graph",
            Self::Vertices(_) => "vertex",
            Self::Edges(_) => "edge",
            Self::Values(_) => "value",
        }
    }

    fn mismatch(&self, step: &Step) -> PipeError {
        PipeError::StepMismatch {
            step: step.name().to_string(),
            stage: self.kind(),
        }
    }

    /// Wrap the traversal in the pipe for `step`
    ///
    /// `stddev` is not handled here since it produces a stats handle; see
    /// [`Query::push`].
    pub fn apply(self, step: &Step) -> PipeResult<Self> {
        let stage = match (self, step) {
            (Self::Graph(t), Step::Vertices) => Self::Vertices(t.vertices()),
            (Self::Graph(t), Step::Edges) => Self::Edges(t.edges()),

            (Self::Vertices(t), Step::OutE(labels)) => Self::Edges(t.out_e(&as_strs(labels))),
            (Self::Vertices(t), Step::InE(labels)) => Self::Edges(t.in_e(&as_strs(labels))),
            (Self::Vertices(t), Step::BothE(labels)) => Self::Edges(t.both_e(&as_strs(labels))),
            (Self::Vertices(t), Step::Out(labels)) => Self::Vertices(t.out(&as_strs(labels))),
            (Self::Vertices(t), Step::In(labels)) => Self::Vertices(t.in_(&as_strs(labels))),
            (Self::Vertices(t), Step::Both(labels)) => Self::Vertices(t.both(&as_strs(labels))),

            (Self::Edges(t), Step::OutV) => Self::Vertices(t.out_v()),
            (Self::Edges(t), Step::InV) => Self::Vertices(t.in_v()),
            (Self::Edges(t), Step::BothV) => Self::Vertices(t.both_v()),

            (Self::Vertices(t), Step::Label { comparison, label }) => {
                Self::Vertices(t.has_label(label.as_str(), *comparison))
            }
            (Self::Edges(t), Step::Label { comparison, label }) => {
                Self::Edges(t.has_label(label.as_str(), *comparison))
            }
            (Self::Vertices(t), Step::Has { key, comparison, value }) => {
                Self::Vertices(t.has(key.as_str(), *comparison, value.clone()))
            }
            (Self::Edges(t), Step::Has { key, comparison, value }) => {
                Self::Edges(t.has(key.as_str(), *comparison, value.clone()))
            }
            (Self::Vertices(t), Step::Values(keys)) => Self::Values(t.values(&as_strs(keys))),
            (Self::Edges(t), Step::Values(keys)) => Self::Values(t.values(&as_strs(keys))),
            (Self::Vertices(t), Step::Properties(keys)) => Self::Values(t.properties(&as_strs(keys))),
            (Self::Edges(t), Step::Properties(keys)) => Self::Values(t.properties(&as_strs(keys))),

            (stage, step) => return Err(stage.mismatch(step)),
        };
        Ok(stage)
    }

    /// Advance and describe the new element
    pub fn next_item(&mut self) -> Option<PathItem> {
        match self {
            Self::Graph(t) => t.next_item().map(PathItem::from),
            Self::Vertices(t) => t.next_item().map(PathItem::from),
            Self::Edges(t) => t.next_item().map(PathItem::from),
            Self::Values(t) => t.next_item().map(PathItem::from),
        }
    }

    pub fn path(&self) -> Path {
        match self {
            Self::Graph(t) => t.path(),
            Self::Vertices(t) => t.path(),
            Self::Edges(t) => t.path(),
            Self::Values(t) => t.path(),
        }
    }

    pub fn next_with_path(&mut self) -> Option<(PathItem, Path)> {
        let item = self.next_item()?;
        Some((item, self.path()))
    }

    pub fn reset(&mut self) {
        match self {
            Self::Graph(t) => t.reset(),
            Self::Vertices(t) => t.reset(),
            Self::Edges(t) => t.reset(),
            Self::Values(t) => t.reset(),
        }
    }
}

/// A traversal built from text steps over one graph
pub struct Query<'g> {
    stage: Stage<'g>,
    steps: Vec<Step>,
    stats: Option<Arc<RunningStats>>,
}

impl<'g> Query<'g> {
    pub fn new(graph: &'g PropertyGraph) -> Self {
        Self {
            stage: Stage::Graph(Traversal::over(graph)),
            steps: Vec::new(),
            stats: None,
        }
    }

    /// Parse and apply every step in order
    pub fn parse<S: AsRef<str>>(graph: &'g PropertyGraph, steps: &[S]) -> PipeResult<Self> {
        steps
            .iter()
            .try_fold(Self::new(graph), |query, step| query.push(step.as_ref().parse()?))
    }

    pub fn push(self, step: Step) -> PipeResult<Self> {
        tracing::debug!(step = step.name(), stage = self.stage.kind(), "Applying step");
        let Self {
            stage,
            mut steps,
            mut stats,
        } = self;

        let stage = match (stage, &step) {
            (Stage::Values(t), Step::StdDev) => {
                let (t, handle) = t.std_dev();
                stats = Some(handle);
                Stage::Values(t)
            }
            (stage, Step::StdDev) => return Err(stage.mismatch(&step)),
            (stage, step) => stage.apply(step)?,
        };
        steps.push(step);
        Ok(Self { stage, steps, stats })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn stage(&self) -> &Stage<'g> {
        &self.stage
    }

    /// Handle on the last `stddev` step, if any
    pub fn stats(&self) -> Option<&Arc<RunningStats>> {
        self.stats.as_ref()
    }

    pub fn next_item(&mut self) -> Option<PathItem> {
        self.stage.next_item()
    }

    pub fn next_with_path(&mut self) -> Option<(PathItem, Path)> {
        self.stage.next_with_path()
    }

    pub fn reset(&mut self) {
        self.stage.reset();
    }

    /// Collect up to `limit` elements
    pub fn run(&mut self, limit: Option<usize>) -> Vec<PathItem> {
        let limit = limit.unwrap_or(usize::MAX);
        std::iter::from_fn(|| self.next_item()).take(limit).collect()
    }
}
