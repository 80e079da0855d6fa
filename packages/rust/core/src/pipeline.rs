//! End-to-end `build` pipeline: records → ordinal table → evolution graph →
//! per-record pages → index → stylesheet → manifest.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use dexgen_html::{
    DEFAULT_STYLESHEET, INDEX_FILE, IndexRow, RecordPage, STYLESHEET_FILE, render_index_page,
    render_record_page,
};
use dexgen_shared::{BuildConfig, LoadedRecord, Result};

use crate::assembler::{self, ManifestInfo};
use crate::evolution::{EvolutionGraph, build_tree};
use crate::index::GlobalIndex;

/// Configuration for the `build_site` pipeline.
#[derive(Debug, Clone)]
pub struct BuildSiteConfig {
    /// Paths and site settings.
    pub build: BuildConfig,
    /// Tool version string.
    pub tool_version: String,
}

/// Result of the `build_site` pipeline.
#[derive(Debug)]
pub struct BuildSiteResult {
    /// Directory the site was written to.
    pub output_dir: PathBuf,
    /// Number of record pages written.
    pub page_count: usize,
    /// Records that belong to an evolution family.
    pub evolving_count: usize,
    /// Evolution edges in the dataset.
    pub edge_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each record page is written.
    fn record_rendered(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildSiteResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_rendered(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildSiteResult) {}
}

/// Run the full `build` pipeline.
///
/// 1. Load every record under the database directory
/// 2. Build the ordinal table and the evolution graph
/// 3. Render and write one page per record, in loader order
/// 4. Write the index page, stylesheet and manifest
///
/// The first error aborts the batch; pages already written stay on disk.
#[instrument(skip_all, fields(db = %config.build.db_dir.display(), out = %config.build.output_dir.display()))]
pub fn build_site(
    config: &BuildSiteConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildSiteResult> {
    let start = Instant::now();
    let build = &config.build;

    info!("starting build pipeline");

    // --- Phase 1: Load ---
    progress.phase("Loading records");
    let records = dexgen_loader::load_records(&build.db_dir)?;

    // --- Phase 2: Global structures ---
    progress.phase("Indexing");
    let index = GlobalIndex::build(&records)?;
    let graph = EvolutionGraph::build(&records);

    // --- Phase 3: Record pages ---
    progress.phase("Rendering pages");
    assembler::prepare_output_dir(&build.output_dir)?;

    let total = records.len();
    let mut written = Vec::with_capacity(total + 2);
    let mut evolving_count = 0;

    for (i, loaded) in records.iter().enumerate() {
        let (html, has_family) = render_record(loaded, &index, &graph)?;
        if has_family {
            evolving_count += 1;
        }
        let file = format!("{}.html", loaded.file_key);
        written.push(assembler::write_document(&build.output_dir, &file, &html)?);
        progress.record_rendered(&loaded.record.name, i + 1, total);
    }

    // --- Phase 4: Index, stylesheet, manifest ---
    progress.phase("Writing index");
    let index_html = render_index(&build.title, &records, &index);
    written.push(assembler::write_document(
        &build.output_dir,
        INDEX_FILE,
        &index_html,
    )?);

    written.push(assembler::write_stylesheet(
        &build.output_dir,
        STYLESHEET_FILE,
        build.stylesheet.as_deref(),
        DEFAULT_STYLESHEET,
    )?);

    assembler::write_manifest(
        &build.output_dir,
        &ManifestInfo {
            title: build.title.clone(),
            tool_version: config.tool_version.clone(),
            page_count: total,
        },
        written,
    )?;

    let result = BuildSiteResult {
        output_dir: build.output_dir.clone(),
        page_count: total,
        evolving_count,
        edge_count: graph.edges().len(),
        elapsed: start.elapsed(),
    };

    info!(
        pages = result.page_count,
        evolving = result.evolving_count,
        edges = result.edge_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "build complete"
    );

    progress.done(&result);
    Ok(result)
}

/// Render one record's page. Also reports whether the record has a family.
pub fn render_record(
    loaded: &LoadedRecord,
    index: &GlobalIndex,
    graph: &EvolutionGraph,
) -> Result<(String, bool)> {
    let record = &loaded.record;

    let tree = match graph.resolve_family(&record.name, index)? {
        Some(family) => Some(build_tree(&family, &record.name, index)?),
        None => None,
    };

    let neighbors = index.neighbors(record.index);
    debug!(
        name = %record.name,
        prev = ?neighbors.prev.map(|e| &e.name),
        next = ?neighbors.next.map(|e| &e.name),
        "rendering record"
    );

    let html = render_record_page(&RecordPage {
        record,
        prev: neighbors.prev,
        next: neighbors.next,
        family: tree.as_ref(),
    });
    Ok((html, tree.is_some()))
}

/// Render the index page over all records.
pub fn render_index(title: &str, records: &[LoadedRecord], index: &GlobalIndex) -> String {
    let rows: Vec<IndexRow<'_>> = records
        .iter()
        .filter_map(|loaded| {
            index
                .by_name(&loaded.record.name)
                .map(|entry| IndexRow {
                    entry,
                    record: &loaded.record,
                })
        })
        .collect();
    render_index_page(title, &rows)
}
