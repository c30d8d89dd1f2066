use super::patterns::count_source;
use super::MetricsCollector;
use crate::config::CollectorConfig;
use crate::core::{FileCounts, MetricSnapshot, MetricSnapshotBuilder};
use crate::errors::Error;
use crate::io::FileWalker;
use std::fs;
use std::path::{Path, PathBuf};

/// Counts functions, classes, lines, doc comments, tests, security pattern
/// hits and modern pattern usage by scanning source text line by line.
#[derive(Debug, Clone, Default)]
pub struct TextMetricsCollector {
    config: CollectorConfig,
}

impl TextMetricsCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    fn source_files(&self, project: &Path) -> Vec<PathBuf> {
        FileWalker::new(project.to_path_buf())
            .with_extensions(self.config.extensions.clone())
            .with_ignore_patterns(&self.config.ignore)
            .walk()
            .unwrap_or_else(|e| {
                let err = Error::Collection(format!("{}: {}", project.display(), e));
                tracing::warn!(error = %err, "no files collected");
                Vec::new()
            })
    }

    fn add_file(builder: &mut MetricSnapshotBuilder, project: &Path, path: &Path) {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = Error::Collection(format!("{}: {}", path.display(), e));
                tracing::warn!(error = %err, "skipping unreadable file");
                return;
            }
        };

        // Non-UTF-8 sources still count as files
        let content = String::from_utf8_lossy(&bytes);
        let counts = count_source(&content);
        builder.add_documented_functions(counts.documented_functions);
        builder.add_test_functions(counts.test_functions);
        builder.add_security_hits(counts.security_hits);
        for (name, count) in &counts.patterns {
            builder.add_pattern_usage(name, *count);
        }
        builder.push_file(FileCounts {
            path: path.strip_prefix(project).unwrap_or(path).to_path_buf(),
            functions: counts.functions,
            classes: counts.classes,
            lines: counts.lines,
        });
    }
}

impl MetricsCollector for TextMetricsCollector {
    fn collect(&self, project: &Path) -> MetricSnapshot {
        let mut builder = MetricSnapshot::builder();
        for path in self.source_files(project) {
            Self::add_file(&mut builder, project, &path);
        }
        let snapshot = builder.build();
        tracing::info!(
            files = snapshot.file_count,
            functions = snapshot.function_count,
            tests = snapshot.test_function_count,
            security_hits = snapshot.security_hit_count,
            "collected metrics"
        );
        snapshot
    }
}
