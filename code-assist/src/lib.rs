//! Core code-assist pipeline.
//!
//! Single high-level entry to transform a block of source code per task and
//! render it as highlighted markup with changed lines flagged:
//!
//! 1) **Validate** — size gate first (line count vs. limit), then task wire
//!    name, then source/target language tags against the registry.
//! 2) **Cache lookup** — deterministic SHA256 key over (task, source
//!    language, code, target language); a hit returns the stored markup
//!    unchanged.
//! 3) **Generate** — build the task instruction prompt and call the
//!    injected generation engine (the only suspension point).
//! 4) **Diff** — for fix tasks, align original and generated lines and
//!    collect the transformed-side numbers of added/modified lines.
//! 5) **Render + store** — tokenize, overlay changed markers, write the
//!    markup to the cache, return.
//!
//! The pipeline uses `tracing` for per-stage debug logging and avoids heap
//! trait objects: the engine is enum-dispatched and injected at
//! construction, so tests substitute the scripted backend.

pub mod cache;
pub mod diff;
pub mod errors;
pub mod highlight;
pub mod prompt;
pub mod registry;
pub mod task;

use std::time::Instant;

use tracing::debug;

use llm_engine::GenerationEngine;
use llm_engine::error_handler::ProviderError;

pub use cache::{CacheKey, DEFAULT_CACHE_CAPACITY, ResultCache};
pub use errors::{AssistResult, Error};
pub use highlight::RenderedOutput;
pub use registry::{Language, supported_tags};
pub use task::Task;

use diff::split_lines;

/// Default document line limit.
pub const DEFAULT_MAX_LINES: usize = 10_000;

/// Source language assumed when the request omits one.
const DEFAULT_SOURCE_LANGUAGE: Language = Language::Python;

/// Tunables for [`AssistPipeline`].
#[derive(Debug, Clone)]
pub struct AssistOptions {
    /// Maximum accepted document line count.
    pub max_lines: usize,
    /// Rendered-result cache capacity, in entries.
    pub cache_capacity: usize,
}

impl Default for AssistOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// One inbound transformation request, as received from the web layer.
#[derive(Debug, Clone, Copy)]
pub struct AssistRequest<'a> {
    /// Task wire name (`spiegazione`, `traduzione`, `fix`).
    pub task: &'a str,
    /// Source code to transform.
    pub code: &'a str,
    /// Source language tag; `python` when absent.
    pub source_lang: Option<&'a str>,
    /// Target language tag; required for translate, ignored otherwise.
    pub target_lang: Option<&'a str>,
}

/// The assembled pipeline: generation engine, cache, and limits.
#[derive(Debug)]
pub struct AssistPipeline {
    engine: GenerationEngine,
    cache: ResultCache,
    max_lines: usize,
}

impl AssistPipeline {
    /// Builds a pipeline around an already-constructed engine.
    pub fn new(engine: GenerationEngine, options: AssistOptions) -> Self {
        Self {
            engine,
            cache: ResultCache::new(options.cache_capacity),
            max_lines: options.max_lines,
        }
    }

    /// The injected engine, for health probes and logging.
    pub fn engine(&self) -> &GenerationEngine {
        &self.engine
    }

    /// Runs the full pipeline for one request.
    ///
    /// Side effects per call: one cache read, at most one engine
    /// invocation, at most one cache write. Nothing is written to the cache
    /// on any error path.
    ///
    /// # Errors
    /// - [`Error::InputTooLarge`] before any other check when the document
    ///   exceeds the line limit;
    /// - [`Error::InvalidTask`] for an unknown task wire name;
    /// - [`Error::UnsupportedLanguage`] for an unknown source tag, or a
    ///   missing/unknown translate target;
    /// - [`Error::Generation`] when the engine fails or returns an empty
    ///   completion.
    pub async fn process(&self, request: AssistRequest<'_>) -> AssistResult<RenderedOutput> {
        let t0 = Instant::now();

        let original_lines = split_lines(request.code);
        if original_lines.len() > self.max_lines {
            return Err(Error::InputTooLarge {
                lines: original_lines.len(),
                max_lines: self.max_lines,
            });
        }

        let task = Task::parse(request.task)?;
        let source = parse_language(request.source_lang.unwrap_or(DEFAULT_SOURCE_LANGUAGE.tag()))?;
        let target = match task {
            Task::Translate => Some(parse_language(request.target_lang.unwrap_or(""))?),
            Task::Explain | Task::Fix => None,
        };
        // Explain/fix render in the source language; translate in the target.
        let output_language = target.unwrap_or(source);

        let key = CacheKey::compute(task, source, request.code, target);
        if let Some(markup) = self.cache.get(&key) {
            debug!(
                %task,
                language = %output_language,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "cache hit"
            );
            return Ok(RenderedOutput {
                markup,
                language: output_language,
            });
        }
        debug!(%task, language = %output_language, "cache miss, invoking engine");

        let instruction = match task {
            Task::Explain => prompt::explain(request.code),
            Task::Translate => prompt::translate(request.code, output_language),
            Task::Fix => prompt::fix(request.code),
        };

        let t_gen = Instant::now();
        let generated = self.engine.generate(&instruction).await?;
        if generated.trim().is_empty() {
            return Err(Error::Generation(ProviderError::EmptyCompletion.into()));
        }
        debug!(
            reply_lines = split_lines(&generated).len(),
            elapsed_ms = t_gen.elapsed().as_millis() as u64,
            "generation done"
        );

        let diff_lines = match task {
            Task::Fix => {
                let generated_lines = split_lines(&generated);
                let flags = diff::diff_added_or_modified(&original_lines, &generated_lines);
                debug!(flagged = flags.len(), "diff computed");
                flags
            }
            Task::Explain | Task::Translate => Vec::new(),
        };

        let rendered = highlight::render(&generated, output_language, &diff_lines);
        self.cache.put(key, rendered.markup.clone());
        debug!(
            %task,
            language = %output_language,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "request rendered"
        );

        Ok(rendered)
    }
}

fn parse_language(tag: &str) -> AssistResult<Language> {
    Language::parse(tag).ok_or_else(|| Error::UnsupportedLanguage {
        tag: tag.to_string(),
    })
}
